//! Filesystem module.
//!
//! Provides:
//! - Filename sanitization and extension filtering
//! - Directory creation and staging listing

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, ExtensionFilter, MAX_FILENAME_LENGTH};
pub use paths::{ensure_dir, list_staging, StagingEntry};
