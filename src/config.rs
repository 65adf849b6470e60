//! Run configuration: watched roots, valid extensions and output path.
//!
//! A run is described by an [`IndexConfig`]. Values come from, in increasing
//! precedence, the built-in defaults, an optional YAML file and the command
//! line. Every YAML key is optional:
//!
//! ```yaml
//! watched_roots: [archives, notes]
//! valid_extensions: [".md", ".markdown"]
//! output_path: README.md
//! sort_entries: true
//! leading_blank_line: true
//! description:
//!   strategy: line_number   # or first_non_empty
//!   line: 10
//!   max_chars: 100
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub const DEFAULT_WATCHED_ROOT: &str = "archives";
pub const DEFAULT_EXTENSION: &str = ".md";
pub const DEFAULT_OUTPUT_PATH: &str = "README.md";
pub const DEFAULT_DESCRIPTION_LINE: usize = 10;
pub const DEFAULT_MAX_CHARS: usize = 100;

/// How a description is pulled out of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionStrategy {
    /// Fixed line number (the documentation header convention).
    #[default]
    LineNumber,
    /// First line with non-whitespace content.
    FirstNonEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionSettings {
    pub strategy: DescriptionStrategy,
    /// 1-indexed line used by [`DescriptionStrategy::LineNumber`].
    pub line: usize,
    /// Maximum description length in characters.
    pub max_chars: usize,
}

impl Default for DescriptionSettings {
    fn default() -> Self {
        Self {
            strategy: DescriptionStrategy::LineNumber,
            line: DEFAULT_DESCRIPTION_LINE,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Everything a single index run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Roots to scan, relative to `base_dir` unless absolute.
    pub watched_roots: Vec<PathBuf>,
    /// Extensions including the leading dot, matched case-sensitively.
    pub valid_extensions: BTreeSet<String>,
    /// Output file, relative to `base_dir` unless absolute.
    pub output_path: PathBuf,
    /// Directory that keys and links are made relative to.
    pub base_dir: PathBuf,
    /// Walk directories and list files in lexical order instead of walk order.
    pub sort_entries: bool,
    /// Start the rendered index with an empty line.
    pub leading_blank_line: bool,
    pub description: DescriptionSettings,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            watched_roots: vec![PathBuf::from(DEFAULT_WATCHED_ROOT)],
            valid_extensions: BTreeSet::from([DEFAULT_EXTENSION.to_string()]),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            base_dir: PathBuf::from("."),
            sort_entries: false,
            leading_blank_line: true,
            description: DescriptionSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    watched_roots: Option<Vec<PathBuf>>,
    valid_extensions: Option<Vec<String>>,
    output_path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    sort_entries: Option<bool>,
    leading_blank_line: Option<bool>,
    #[serde(default)]
    description: FileDescriptionConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileDescriptionConfig {
    strategy: Option<DescriptionStrategy>,
    line: Option<usize>,
    max_chars: Option<usize>,
}

/// Normalize an extension to its dotted form: `md` becomes `.md`.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

impl IndexConfig {
    /// Build the effective configuration from the command line and the
    /// optional YAML file it names.
    #[instrument(level = "debug", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Load a YAML file over the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to `()`, not to a map.
        let file: FileConfig = if raw.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(raw)?
        };

        let mut config = Self::default();
        if let Some(roots) = file.watched_roots {
            config.watched_roots = roots;
        }
        if let Some(exts) = file.valid_extensions {
            config.valid_extensions = exts.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(output) = file.output_path {
            config.output_path = output;
        }
        if let Some(base) = file.base_dir {
            config.base_dir = base;
        }
        if let Some(sort) = file.sort_entries {
            config.sort_entries = sort;
        }
        if let Some(blank) = file.leading_blank_line {
            config.leading_blank_line = blank;
        }
        if let Some(strategy) = file.description.strategy {
            config.description.strategy = strategy;
        }
        if let Some(line) = file.description.line {
            config.description.line = line;
        }
        if let Some(max_chars) = file.description.max_chars {
            config.description.max_chars = max_chars;
        }
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if !cli.roots.is_empty() {
            self.watched_roots = cli.roots.clone();
        }
        if !cli.extensions.is_empty() {
            self.valid_extensions = cli.extensions.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(output) = &cli.output {
            self.output_path = output.clone();
        }
        if let Some(base) = &cli.base_dir {
            self.base_dir = base.clone();
        }
        if cli.sort {
            self.sort_entries = true;
        }
        if cli.no_leading_blank {
            self.leading_blank_line = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watched_roots.is_empty() {
            return Err(ConfigError::Invalid("at least one watched root is required".into()));
        }
        if self.valid_extensions.is_empty() {
            return Err(ConfigError::Invalid("at least one valid extension is required".into()));
        }
        if self.valid_extensions.iter().any(|e| e.len() < 2) {
            return Err(ConfigError::Invalid("extensions must not be empty".into()));
        }
        if self.description.line == 0 {
            return Err(ConfigError::Invalid("description line is 1-indexed".into()));
        }
        if self.description.max_chars == 0 {
            return Err(ConfigError::Invalid("description max_chars must be positive".into()));
        }
        Ok(())
    }

    /// Output path joined onto `base_dir` when relative.
    pub fn resolved_output_path(&self) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            self.base_dir.join(&self.output_path)
        }
    }
}
