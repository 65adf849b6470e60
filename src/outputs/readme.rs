//! README regeneration.
//!
//! The output file is replaced wholesale on every run. There is no merge
//! with previous content and no backup of it.

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::outputs::outline::{render_outline, RenderSettings};
use crate::scanner::tree::build_file_tree;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Scan, render and overwrite the configured output file.
///
/// # Returns
///
/// The path that was written (the output path joined onto the base
/// directory when relative).
///
/// # Errors
///
/// Returns [`IndexError::Write`] if the output file (or its parent
/// directory) cannot be written. Unreadable inputs never fail the run.
#[instrument(level = "info", skip_all, fields(output = %config.output_path.display()))]
pub async fn update_readme(config: &IndexConfig) -> Result<PathBuf, IndexError> {
    let tree = build_file_tree(config).await;
    let settings = RenderSettings {
        leading_blank_line: config.leading_blank_line,
    };
    let content = render_outline(&tree, &settings);

    let output = config.resolved_output_path();
    write_index(&output, &content).await?;
    info!(
        path = %output.display(),
        bytes = content.len(),
        directories = tree.len(),
        files = tree.file_count(),
        "Wrote index"
    );
    Ok(output)
}

/// Console line reporting the file that was written.
pub fn confirmation_line(written: &Path) -> String {
    format!("Updated {}", written.display())
}

/// Overwrite `path` with `content`, creating missing parent directories.
pub async fn write_index(path: &Path, content: &str) -> Result<(), IndexError> {
    let to_error = |source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(path = %parent.display(), error = %e, "Failed to create output directory");
            return Err(to_error(e));
        }
    }

    fs::write(path, content).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed writing index");
        to_error(e)
    })
}
