//! Output generation for the README index.
//!
//! # Submodules
//!
//! - [`outline`]: Groups scanned directories and renders the markdown outline
//! - [`readme`]: Runs the scan and overwrites the output file
//!
//! # Output Structure
//!
//! ```text
//! base_dir/
//! ├── README.md            # generated, replaced on every run
//! └── archives/
//!     ├── a.md             # "## archives" / "- **(root)**"
//!     └── notes/
//!         └── b.md         # "## archives" / "- **notes**"
//! ```

pub mod outline;
pub mod readme;
