//! Filesystem scanning for the index.
//!
//! Scanning runs in two steps per watched root:
//!
//! 1. **Walking**: [`tree::build_file_tree`] visits every directory and keeps
//!    files with a configured extension
//! 2. **Describing**: [`description::describe`] reads each kept file for its
//!    one-line description
//!
//! Files are read one at a time; a file that cannot be read still gets an
//! entry, with the error text as its description.

pub mod description;
pub mod tree;
