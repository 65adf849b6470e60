//! Grouping and rendering of the markdown outline.
//!
//! Directories are grouped by their first path segment. Within a group, each
//! remaining sub-path gets a bold bullet and the files found there are
//! listed beneath it:
//!
//! ```text
//!
//! ## archives
//! - **(root)**
//!   - [a.md](archives/a.md): Quarterly summary
//! - **notes**
//!   - [b.md](archives/notes/b.md): No description: less than 10 lines
//!
//! ```
//!
//! Groups and sub-groups appear in the order they are first met in the
//! mapping; nothing is re-sorted here.

use crate::models::{DirectoryMapping, FileEntry, GroupedOutline};

const ROOT_LABEL: &str = "(root)";
const FILE_INDENT: &str = "  ";

/// Bucket every directory of `tree` under `(top segment, remaining sub-path)`.
pub fn group_outline(tree: &DirectoryMapping) -> GroupedOutline {
    let mut outline = GroupedOutline::default();
    for (dir, files) in tree.iter() {
        let (top, sub) = split_dir(dir);
        outline.push(top, sub, files);
    }
    outline
}

fn split_dir(dir: &str) -> (&str, Option<String>) {
    match dir.split_once('/') {
        Some((top, rest)) => (top, Some(rest.to_string())),
        None => (dir, None),
    }
}

/// Formatting switches for [`render_outline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Start the text with an empty line.
    pub leading_blank_line: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            leading_blank_line: true,
        }
    }
}

/// Render `tree` as the index text.
pub fn render_outline(tree: &DirectoryMapping, settings: &RenderSettings) -> String {
    let outline = group_outline(tree);

    let mut lines: Vec<String> = Vec::new();
    if settings.leading_blank_line {
        lines.push(String::new());
    }

    for group in &outline.groups {
        lines.push(format!("## {}", group.name));
        for (sub, files) in &group.subgroups {
            match sub {
                Some(sub) if !sub.is_empty() => lines.push(format!("- **{}**", sub)),
                _ => lines.push(format!("- **{}**", ROOT_LABEL)),
            }
            lines.extend(files.iter().map(file_line));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn file_line(file: &FileEntry) -> String {
    format!(
        "{}- [{}]({}): {}",
        FILE_INDENT, file.filename, file.full_path, file.description
    )
}
