//! Utility functions for string truncation and path display.
//!
//! This module provides helper functions used throughout the application:
//! - Character-safe truncation for descriptions and log previews
//! - Conversion of filesystem paths into `/`-separated index keys

use std::path::{Component, Path};

/// Keep at most `max` characters of `s`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Returns
///
/// The original string if shorter than `max`, otherwise a truncated version
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", kept, s.len() - kept.len())
    }
}

/// Render `path` relative to `base` as a `/`-separated key.
///
/// Both paths are canonicalized when they exist (made absolute otherwise),
/// so a path outside `base` comes out with leading `..` segments. A path
/// equal to `base` renders as `"."`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(relative_key(Path::new("/srv/archives"), Path::new("/srv/site")), "../archives");
/// ```
pub fn relative_key(path: &Path, base: &Path) -> String {
    let path = resolve(path);
    let base = resolve(base);

    let shared = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let parts: Vec<String> = std::iter::repeat_n("..".to_string(), base.len() - shared)
        .chain(path[shared..].iter().cloned())
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Absolute, `.`/`..`-free components of `path`. The root is kept as `""`.
fn resolve(path: &Path) -> Vec<String> {
    let absolute = std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());

    let mut parts = Vec::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::RootDir => parts.push(String::new()),
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts
}

/// Join a directory key and a file name into a link path.
pub fn join_key(dir: &str, filename: &str) -> String {
    if dir == "." {
        filename.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), filename)
    }
}
