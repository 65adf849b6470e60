//! Error types for the index pipeline.
//!
//! Only two failures are allowed to stop a run: an invalid configuration and
//! a failed write of the output file. Description read failures are carried
//! as [`DescriptionError`] and degraded to placeholder text by the scanner.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a description out of a scanned file.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The file could not be opened or decoded as UTF-8 text.
    #[error("{source}")]
    Read {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Problems loading or validating an [`IndexConfig`](crate::config::IndexConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal errors surfaced by [`update_readme`](crate::outputs::readme::update_readme).
#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write index to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_description_error_displays_io_detail_only() {
        let err = DescriptionError::Read {
            path: PathBuf::from("archives/missing.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "No such file or directory");
    }

    #[test]
    fn test_index_error_wraps_config_error() {
        let err: IndexError = ConfigError::Invalid("no watched roots".into()).into();
        assert_eq!(err.to_string(), "invalid configuration: no watched roots");
    }
}
