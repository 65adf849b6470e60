//! Command-line interface definitions for the README indexer.
//!
//! Every flag is optional. Without any, the indexer scans `archives/` for
//! `.md` files and rewrites `README.md` in the working directory.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the README indexer.
///
/// Flags override values loaded from `--config`, which in turn override the
/// built-in defaults.
///
/// # Examples
///
/// ```sh
/// # Defaults: archives/ -> README.md
/// readme_index
///
/// # Two roots, markdown and text files, sorted output
/// readme_index -r archives -r notes -e md -e txt --sort
///
/// # Settings from a YAML file
/// readme_index -c index.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long, env = "README_INDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root directory to scan (repeatable)
    #[arg(short = 'r', long = "root")]
    pub roots: Vec<PathBuf>,

    /// File extension to index, with or without the leading dot (repeatable)
    #[arg(short = 'e', long = "ext")]
    pub extensions: Vec<String>,

    /// File to overwrite with the generated index
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory that scanned paths and links are relative to
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Sort directories and files lexically instead of using walk order
    #[arg(long)]
    pub sort: bool,

    /// Do not start the index with an empty line
    #[arg(long)]
    pub no_leading_blank: bool,
}
