//! # README Index
//!
//! Regenerates a README that indexes the markdown files kept under one or
//! more watched directories. Each file is listed with a one-line description
//! taken from a fixed line of the file, grouped by top-level folder and
//! sub-folder.
//!
//! ## Usage
//!
//! ```sh
//! readme_index                       # archives/*.md -> README.md
//! readme_index -r archives -r notes -o INDEX.md --sort
//! ```
//!
//! ## Architecture
//!
//! One sequential pass:
//! 1. **Scanning**: walk the watched roots and read each matching file's description
//! 2. **Rendering**: group directories and render the outline text
//! 3. **Output**: overwrite the output file and print a confirmation

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scanner;
mod utils;

use cli::Cli;
use config::IndexConfig;
use outputs::readme::{confirmation_line, update_readme};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout is reserved for the confirmation line.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match IndexConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        roots = ?config.watched_roots,
        extensions = ?config.valid_extensions,
        output = %config.output_path.display(),
        "readme_index starting up"
    );

    let written = update_readme(&config).await?;
    println!("{}", confirmation_line(&written));

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
