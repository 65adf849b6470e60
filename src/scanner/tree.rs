//! Directory walking and file filtering.
//!
//! Each watched root is walked top-down. Every visited directory contributes
//! its immediate files whose extension is configured; directories without
//! such files are left out of the mapping entirely.

use crate::config::IndexConfig;
use crate::models::{DirectoryMapping, FileEntry};
use crate::scanner::description::describe;
use crate::utils::{join_key, relative_key, truncate_for_log};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Scan every watched root and collect matching files per directory.
///
/// Keys are directory paths relative to `config.base_dir`. Unreadable
/// directories are logged and skipped; the scan itself never fails.
#[instrument(level = "info", skip_all, fields(roots = config.watched_roots.len(), base_dir = %config.base_dir.display()))]
pub async fn build_file_tree(config: &IndexConfig) -> DirectoryMapping {
    let mut tree = DirectoryMapping::new();

    for root in &config.watched_roots {
        let root_path = config.base_dir.join(root);
        if !root_path.is_dir() {
            warn!(root = %root_path.display(), "Watched root is not a directory; skipping");
            continue;
        }

        for dir in walk_dirs(&root_path, config.sort_entries) {
            let filenames =
                match matching_files(&dir, &config.valid_extensions, config.sort_entries).await {
                    Ok(names) => names,
                    Err(e) => {
                        warn!(dir = %dir.display(), error = %e, "Cannot list directory; skipping");
                        continue;
                    }
                };
            if filenames.is_empty() {
                continue;
            }

            let rel_dir = relative_key(&dir, &config.base_dir);
            let mut entries = Vec::with_capacity(filenames.len());
            for filename in filenames {
                let description = describe(&dir.join(&filename), &config.description).await;
                debug!(
                    dir = %rel_dir,
                    file = %filename,
                    description = %truncate_for_log(&description, 60),
                    "Indexed file"
                );
                let full_path = join_key(&rel_dir, &filename);
                entries.push(FileEntry::new(filename, full_path, description));
            }
            tree.insert(rel_dir, entries);
        }
    }

    if tree.is_empty() {
        warn!("No matching files found under the watched roots");
    } else {
        info!(
            directories = tree.len(),
            files = tree.file_count(),
            "Built file tree"
        );
    }
    tree
}

/// Directories under `root` (itself included), in pre-order.
///
/// Symlinked directories below the root are not descended into.
fn walk_dirs(root: &Path, sorted: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry during walk");
                None
            }
        })
        .collect()
}

/// Names of the non-directory entries of `dir` with a valid extension.
async fn matching_files(
    dir: &Path,
    valid_extensions: &BTreeSet<String>,
    sorted: bool,
) -> io::Result<Vec<String>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        // Follows symlinks; anything that is not a directory counts as a file.
        let is_dir = fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if has_valid_extension(&name, valid_extensions) {
            names.push(name);
        }
    }

    if sorted {
        names.sort();
    }
    Ok(names)
}

/// Case-sensitive match of the final `.suffix`. Dotfiles such as `.md` have none.
pub fn has_valid_extension(filename: &str, valid_extensions: &BTreeSet<String>) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| valid_extensions.contains(&format!(".{}", ext.to_string_lossy())))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn md_exts() -> BTreeSet<String> {
        BTreeSet::from([".md".to_string()])
    }

    fn write_lines(path: &Path, count: usize) {
        if let Some(parent) = path.parent() {
            stdfs::create_dir_all(parent).unwrap();
        }
        let text: String = (1..=count).map(|i| format!("line {}\n", i)).collect();
        stdfs::write(path, text).unwrap();
    }

    fn config_in(tmp: &TempDir) -> IndexConfig {
        IndexConfig {
            base_dir: tmp.path().to_path_buf(),
            sort_entries: true,
            ..IndexConfig::default()
        }
    }

    #[test]
    fn test_has_valid_extension() {
        let exts = md_exts();
        assert!(has_valid_extension("a.md", &exts));
        assert!(has_valid_extension("archive.tar.md", &exts));
        assert!(!has_valid_extension("a.MD", &exts));
        assert!(!has_valid_extension("a.markdown", &exts));
        assert!(!has_valid_extension(".md", &exts));
        assert!(!has_valid_extension("md", &exts));
    }

    #[tokio::test]
    async fn test_build_tree_groups_files_by_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        write_lines(&root.join("a.md"), 12);
        write_lines(&root.join("skip.txt"), 12);
        write_lines(&root.join("notes/b.md"), 3);
        stdfs::create_dir_all(root.join("empty")).unwrap();
        write_lines(&root.join("other/c.txt"), 1);

        let tree = build_file_tree(&config_in(&tmp)).await;

        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["archives", "archives/notes"]);

        let top = tree.get("archives").unwrap();
        assert_eq!(top, &[FileEntry::new("a.md", "archives/a.md", "line 10")]);

        let notes = tree.get("archives/notes").unwrap();
        assert_eq!(notes[0].full_path, "archives/notes/b.md");
        assert_eq!(notes[0].description, "No description: less than 10 lines");
    }

    #[tokio::test]
    async fn test_build_tree_never_has_empty_lists() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        stdfs::create_dir_all(root.join("a/b/c")).unwrap();
        write_lines(&root.join("a/b/c/deep.md"), 1);
        write_lines(&root.join("a/readme.txt"), 1);

        let tree = build_file_tree(&config_in(&tmp)).await;

        assert_eq!(tree.len(), 1);
        assert!(tree.iter().all(|(_, files)| !files.is_empty()));
        assert!(tree.get("archives/a/b/c").is_some());
    }

    #[tokio::test]
    async fn test_sorted_scan_is_lexical() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        for name in ["c.md", "a.md", "b.md"] {
            write_lines(&root.join(name), 1);
        }
        for dir in ["zeta", "alpha", "mid"] {
            write_lines(&root.join(dir).join("x.md"), 1);
        }

        let tree = build_file_tree(&config_in(&tmp)).await;

        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["archives", "archives/alpha", "archives/mid", "archives/zeta"]
        );
        let names: Vec<&str> = tree
            .get("archives")
            .unwrap()
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[tokio::test]
    async fn test_missing_root_yields_empty_tree() {
        let tmp = TempDir::new().unwrap();
        let tree = build_file_tree(&config_in(&tmp)).await;
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_multiple_roots_and_extensions() {
        let tmp = TempDir::new().unwrap();
        write_lines(&tmp.path().join("archives/a.md"), 1);
        write_lines(&tmp.path().join("notes/n.txt"), 1);
        write_lines(&tmp.path().join("notes/skip.rs"), 1);

        let config = IndexConfig {
            watched_roots: vec![PathBuf::from("archives"), PathBuf::from("notes")],
            valid_extensions: BTreeSet::from([".md".to_string(), ".txt".to_string()]),
            ..config_in(&tmp)
        };
        let tree = build_file_tree(&config).await;

        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["archives", "notes"]);
        assert_eq!(tree.get("notes").unwrap()[0].filename, "n.txt");
    }

    #[tokio::test]
    async fn test_absolute_root_outside_base_dir_is_parent_relative() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        let base = tmp.path().join("site");
        write_lines(&root.join("a.md"), 12);
        stdfs::create_dir_all(&base).unwrap();

        let config = IndexConfig {
            watched_roots: vec![root.clone()],
            base_dir: base,
            sort_entries: true,
            ..IndexConfig::default()
        };
        let tree = build_file_tree(&config).await;

        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["../archives"]);
        assert_eq!(
            tree.get("../archives").unwrap()[0].full_path,
            "../archives/a.md"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_file_counts_and_symlinked_dir_is_not_descended() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        let outside = tmp.path().join("outside");
        write_lines(&outside.join("target.md"), 12);
        write_lines(&outside.join("nested/inner.md"), 1);
        write_lines(&root.join("real.md"), 1);
        symlink(outside.join("target.md"), root.join("link.md")).unwrap();
        symlink(outside.join("nested"), root.join("linked")).unwrap();

        let tree = build_file_tree(&config_in(&tmp)).await;

        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["archives"]);

        let files = tree.get("archives").unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["link.md", "real.md"]);
        assert_eq!(files[0].description, "line 10");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("archives");
        let locked = root.join("locked");
        write_lines(&locked.join("hidden.md"), 1);
        write_lines(&root.join("open/visible.md"), 1);
        write_lines(&root.join("top.md"), 1);

        stdfs::set_permissions(&locked, stdfs::Permissions::from_mode(0o000)).unwrap();
        // Permission bits do not stop a superuser.
        let readable = stdfs::read_dir(&locked).is_ok();

        let tree = build_file_tree(&config_in(&tmp)).await;
        stdfs::set_permissions(&locked, stdfs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            return;
        }
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["archives", "archives/open"]);
    }

    #[tokio::test]
    async fn test_listing_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("removed");

        assert!(matching_files(&gone, &md_exts(), false).await.is_err());
    }
}
