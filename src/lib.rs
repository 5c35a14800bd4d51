//! Staging Uploader - accepts authenticated uploads and stages them for a static-site build.
//!
//! Each upload (media files and/or a text note) is written into a directory
//! named by a slug derived from the post date and an optional custom slug:
//!
//! ```text
//! <data_root>/archive/<slug>/<sanitized file name>
//! <data_root>/archive/<slug>/note.md
//! ```
//!
//! # Features
//!
//! - Deterministic, filesystem-safe slugs (`2025-12-24-my-trip`)
//! - Collision-free note-only posts (`2025-12-24-note-a3f9`)
//! - Filename sanitization and extension allow-listing
//! - Last-write-wins re-uploads that merge into the same directory
//! - HTTP Basic authentication, health and debug listing endpoints
//!
//! # Example
//!
//! ```no_run
//! use staging_uploader::{ExtensionFilter, RawAsset, UploadOrchestrator, UploadRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = UploadOrchestrator::new("/data/archive", ExtensionFilter::default());
//!     let summary = orchestrator.handle(UploadRequest {
//!         date: "2025-12-24".into(),
//!         assets: vec![RawAsset::from_bytes("photo.jpg", std::fs::read("photo.jpg")?)],
//!         ..Default::default()
//!     })?;
//!     println!("{}", summary.message());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod output;
pub mod server;
pub mod staging;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use fs::{list_staging, sanitize_filename, ExtensionFilter, StagingEntry};
pub use staging::{
    RawAsset, SlugResolver, StagingWriter, UploadOrchestrator, UploadRequest, UploadSummary,
};
