//! Description extraction from indexed files.
//!
//! Descriptions come from a fixed position in the file rather than from
//! parsing markdown: documents in the watched roots carry a nine-line header
//! block, so line 10 is the summary line.
//!
//! [`extract_description`] reports read failures as [`DescriptionError`];
//! [`describe`] is the total variant used when building the index, which
//! logs the failure and embeds it in the description text instead.

use crate::config::{DescriptionSettings, DescriptionStrategy};
use crate::error::DescriptionError;
use crate::utils::truncate_chars;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

pub const NO_DESCRIPTION_AVAILABLE: &str = "No description available";

/// Placeholder for files shorter than the configured description line.
pub fn too_short_placeholder(line: usize) -> String {
    format!("No description: less than {} lines", line)
}

/// Read `path` and pick its description according to `settings`.
pub async fn extract_description(
    path: &Path,
    settings: &DescriptionSettings,
) -> Result<String, DescriptionError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| DescriptionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(description_from_text(&text, settings))
}

/// Like [`extract_description`], but never fails.
pub async fn describe(path: &Path, settings: &DescriptionSettings) -> String {
    match extract_description(path, settings).await {
        Ok(description) => {
            debug!(path = %path.display(), %description, "Extracted description");
            description
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read description");
            format!("Error reading file: {}", e)
        }
    }
}

/// Pure part of the extraction, split out for testing.
pub fn description_from_text(text: &str, settings: &DescriptionSettings) -> String {
    // A trailing newline does not open an extra line.
    let mut lines = text.lines();
    match settings.strategy {
        DescriptionStrategy::LineNumber => match lines.nth(settings.line.saturating_sub(1)) {
            Some(line) => truncate_chars(line.trim(), settings.max_chars).to_string(),
            None => too_short_placeholder(settings.line),
        },
        DescriptionStrategy::FirstNonEmpty => lines
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| truncate_chars(line, settings.max_chars).to_string())
            .unwrap_or_else(|| NO_DESCRIPTION_AVAILABLE.to_string()),
    }
}
