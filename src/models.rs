//! Data models shared by the scanner and the outline renderer.
//!
//! - [`FileEntry`]: one matching file with its extracted description
//! - [`DirectoryMapping`]: directory path to the files found directly in it
//! - [`GroupedOutline`]: the two-level (top folder, sub-path) grouping
//!
//! Both maps keep insertion order. The order in which the scanner visits
//! directories is the order in which they are rendered.

/// A single indexed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Bare file name, e.g. `a.md`.
    pub filename: String,
    /// Path relative to the base directory, `/`-separated, e.g. `archives/a.md`.
    pub full_path: String,
    /// Description shown after the link.
    pub description: String,
}

impl FileEntry {
    pub fn new(
        filename: impl Into<String>,
        full_path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            full_path: full_path.into(),
            description: description.into(),
        }
    }
}

/// Insertion-ordered mapping from relative directory path to its matching files.
///
/// Keys are unique. Inserting a key that already exists replaces its file
/// list but keeps the key at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryMapping {
    entries: Vec<(String, Vec<FileEntry>)>,
}

impl DirectoryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dir: impl Into<String>, files: Vec<FileEntry>) {
        let dir = dir.into();
        match self.entries.iter_mut().find(|(key, _)| *key == dir) {
            Some((_, existing)) => *existing = files,
            None => self.entries.push((dir, files)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FileEntry])> {
        self.entries
            .iter()
            .map(|(dir, files)| (dir.as_str(), files.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of files across all directories.
    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|(_, files)| files.len()).sum()
    }
}

#[cfg(test)]
impl DirectoryMapping {
    pub fn get(&self, dir: &str) -> Option<&[FileEntry]> {
        self.entries
            .iter()
            .find(|(key, _)| key == dir)
            .map(|(_, files)| files.as_slice())
    }
}

/// Files of one top-level folder, bucketed by sub-path.
///
/// `None` is the top-level folder itself, rendered as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopGroup {
    pub name: String,
    pub subgroups: Vec<(Option<String>, Vec<FileEntry>)>,
}

impl TopGroup {
    fn extend(&mut self, sub: Option<String>, files: &[FileEntry]) {
        match self.subgroups.iter_mut().find(|(key, _)| *key == sub) {
            Some((_, existing)) => existing.extend_from_slice(files),
            None => self.subgroups.push((sub, files.to_vec())),
        }
    }
}

/// Insertion-ordered grouping of a [`DirectoryMapping`] by top folder and sub-path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedOutline {
    pub groups: Vec<TopGroup>,
}

impl GroupedOutline {
    /// Append `files` to the `(top, sub)` bucket, creating either level on first sight.
    pub fn push(&mut self, top: &str, sub: Option<String>, files: &[FileEntry]) {
        let idx = match self.groups.iter().position(|g| g.name == top) {
            Some(idx) => idx,
            None => {
                self.groups.push(TopGroup {
                    name: top.to_string(),
                    subgroups: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        self.groups[idx].extend(sub, files);
    }
}
