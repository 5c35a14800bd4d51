//! Staging module.
//!
//! Turns an upload request into a slug-named directory under the archive
//! root and commits the request's assets and note into it.

pub mod orchestrator;
pub mod slug;
pub mod state;
pub mod writer;

pub use orchestrator::{RawAsset, UploadOrchestrator, UploadRequest};
pub use slug::{slugify, today_utc, SlugResolver, UploadShape};
pub use state::{UploadSummary, UploadTally};
pub use writer::{PersistedAsset, StagingDirectory, StagingWriter, NOTE_FILENAME};
