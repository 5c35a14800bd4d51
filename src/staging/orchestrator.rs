//! Per-request upload pipeline.

use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::{sanitize_filename, ExtensionFilter};
use crate::staging::slug::{SlugResolver, UploadShape};
use crate::staging::state::{UploadSummary, UploadTally};
use crate::staging::writer::{AcceptedAsset, StagingWriter};

/// One client-supplied file. The name is untrusted.
pub struct RawAsset {
    pub original_name: String,
    content: Box<dyn Read + Send>,
}

impl RawAsset {
    pub fn new(original_name: impl Into<String>, content: impl Read + Send + 'static) -> Self {
        Self {
            original_name: original_name.into(),
            content: Box::new(content),
        }
    }

    /// Asset backed by an in-memory buffer.
    pub fn from_bytes(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(original_name, Cursor::new(bytes.into()))
    }
}

impl fmt::Debug for RawAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawAsset")
            .field("original_name", &self.original_name)
            .finish_non_exhaustive()
    }
}

/// A parsed upload request.
#[derive(Debug, Default)]
pub struct UploadRequest {
    pub date: String,
    pub custom_slug: String,
    pub note: String,
    pub assets: Vec<RawAsset>,
}

/// Resolves, filters and writes one upload at a time.
///
/// Holds no mutable state; one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct UploadOrchestrator {
    resolver: SlugResolver,
    filter: ExtensionFilter,
    writer: StagingWriter,
}

impl UploadOrchestrator {
    pub fn new(archive_root: impl Into<PathBuf>, filter: ExtensionFilter) -> Self {
        Self {
            resolver: SlugResolver::new(),
            filter,
            writer: StagingWriter::new(archive_root),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.archive_root(),
            ExtensionFilter::new(&config.storage.allowed_extensions),
        )
    }

    pub fn archive_root(&self) -> &Path {
        self.writer.archive_root()
    }

    /// Stage one upload.
    ///
    /// Fails with [`Error::EmptyRequest`] before touching the disk when there
    /// is neither an asset nor a note. Per-asset problems only show up in the
    /// returned counts.
    pub fn handle(&self, request: UploadRequest) -> Result<UploadSummary> {
        let UploadRequest {
            date,
            custom_slug,
            note,
            mut assets,
        } = request;
        let note = note.trim();

        if assets.is_empty() && note.is_empty() {
            return Err(Error::EmptyRequest);
        }

        let shape = UploadShape {
            has_files: !assets.is_empty(),
            has_note: !note.is_empty(),
        };
        let slug = self.resolver.resolve(date.trim(), custom_slug.trim(), shape);
        let dir = self.writer.ensure_dir(&slug)?;

        let mut tally = UploadTally::default();
        let mut accepted = Vec::with_capacity(assets.len());
        for asset in assets.iter_mut() {
            let sanitized_name = sanitize_filename(&asset.original_name);
            if !self.filter.accepts(&sanitized_name) {
                tracing::debug!("Skipping disallowed extension: {}", sanitized_name);
                tally.increment_skipped();
                continue;
            }

            accepted.push(AcceptedAsset {
                sanitized_name,
                content: asset.content.as_mut(),
            });
        }

        self.writer.commit(&dir, accepted, note, &mut tally);

        let summary = UploadSummary::new(slug, &tally);
        tracing::info!(
            "Staged {}: {} saved, {} skipped, {} failed, note: {}",
            summary.slug,
            summary.saved,
            summary.skipped,
            summary.failed,
            summary.note_saved
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::slug::today_utc;
    use crate::fs::list_staging;
    use crate::staging::writer::NOTE_FILENAME;
    use regex::Regex;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn orchestrator() -> (tempfile::TempDir, UploadOrchestrator) {
        let tmp = tempfile::tempdir().unwrap();
        let orchestrator =
            UploadOrchestrator::new(tmp.path().join("archive"), ExtensionFilter::default());
        (tmp, orchestrator)
    }

    fn request(date: &str, slug: &str, note: &str, assets: Vec<RawAsset>) -> UploadRequest {
        UploadRequest {
            date: date.to_string(),
            custom_slug: slug.to_string(),
            note: note.to_string(),
            assets,
        }
    }

    #[test]
    fn test_single_photo_upload() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "",
                vec![RawAsset::from_bytes("photo.JPG", b"jpeg".to_vec())],
            ))
            .unwrap();

        assert_eq!(summary.slug, "2025-12-24");
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.skipped, 0);
        assert!(!summary.note_saved);

        let dir = orchestrator.archive_root().join("2025-12-24");
        assert_eq!(std::fs::read(dir.join("photo.JPG")).unwrap(), b"jpeg");
    }

    #[test]
    fn test_custom_slug_directory() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request(
                "2025-12-24",
                "My Trip!",
                "",
                vec![RawAsset::from_bytes("a.png", b"png".to_vec())],
            ))
            .unwrap();

        assert_eq!(summary.slug, "2025-12-24-my-trip");
        assert!(orchestrator
            .archive_root()
            .join("2025-12-24-my-trip")
            .join("a.png")
            .is_file());
    }

    #[test]
    fn test_note_only_post() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator.handle(request("", "", "hello", vec![])).unwrap();

        let re = Regex::new(&format!(r"^{}-note-[0-9a-f]{{4}}$", today_utc())).unwrap();
        assert!(re.is_match(&summary.slug), "{}", summary.slug);
        assert!(summary.note_saved);
        assert_eq!(summary.saved, 0);

        let note = orchestrator
            .archive_root()
            .join(&summary.slug)
            .join(NOTE_FILENAME);
        assert_eq!(std::fs::read_to_string(note).unwrap(), "hello\n");
    }

    #[test]
    fn test_note_is_trimmed() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request("2025-12-24", "", "  line one\nline two \n\n", vec![]))
            .unwrap();

        let note = orchestrator
            .archive_root()
            .join(&summary.slug)
            .join(NOTE_FILENAME);
        assert_eq!(
            std::fs::read_to_string(note).unwrap(),
            "line one\nline two\n"
        );
    }

    #[test]
    fn test_disallowed_extension_is_skipped() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "",
                vec![
                    RawAsset::from_bytes("a.exe", b"MZ".to_vec()),
                    RawAsset::from_bytes("b.png", b"png".to_vec()),
                ],
            ))
            .unwrap();

        assert_eq!(summary.saved, 1);
        assert_eq!(summary.skipped, 1);

        let dir = orchestrator.archive_root().join("2025-12-24");
        assert!(dir.join("b.png").is_file());
        assert!(!dir.join("a.exe").exists());
    }

    #[test]
    fn test_empty_request_is_rejected_without_side_effects() {
        let (_tmp, orchestrator) = orchestrator();
        let err = orchestrator
            .handle(request("2025-12-24", "trip", "   ", vec![]))
            .unwrap_err();

        assert!(matches!(err, Error::EmptyRequest));
        assert!(!orchestrator.archive_root().exists());
    }

    #[test]
    fn test_reupload_overwrites_and_counts() {
        let (_tmp, orchestrator) = orchestrator();
        for content in [b"old".to_vec(), b"new".to_vec()] {
            let summary = orchestrator
                .handle(request(
                    "2025-12-24",
                    "trip",
                    "",
                    vec![RawAsset::from_bytes("clip.mp4", content)],
                ))
                .unwrap();
            assert_eq!(summary.saved, 1);
        }

        let path = orchestrator
            .archive_root()
            .join("2025-12-24-trip")
            .join("clip.mp4");
        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn test_file_uploads_merge_into_same_directory() {
        let (_tmp, orchestrator) = orchestrator();
        orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "first caption",
                vec![RawAsset::from_bytes("a.jpg", b"a".to_vec())],
            ))
            .unwrap();
        orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "second caption",
                vec![RawAsset::from_bytes("b.jpg", b"b".to_vec())],
            ))
            .unwrap();

        let dir = orchestrator.archive_root().join("2025-12-24");
        assert!(dir.join("a.jpg").is_file());
        assert!(dir.join("b.jpg").is_file());
        assert_eq!(
            std::fs::read_to_string(dir.join(NOTE_FILENAME)).unwrap(),
            "second caption\n"
        );
    }

    #[test]
    fn test_traversal_names_stay_inside_directory() {
        let (tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "",
                vec![
                    RawAsset::from_bytes("../../escape.png", b"x".to_vec()),
                    RawAsset::from_bytes("..", b"y".to_vec()),
                ],
            ))
            .unwrap();

        assert_eq!(summary.saved, 1);
        assert_eq!(summary.skipped, 1);
        assert!(orchestrator
            .archive_root()
            .join("2025-12-24")
            .join("escape.png")
            .is_file());
        assert!(!tmp.path().join("escape.png").exists());
    }

    #[test]
    fn test_rejected_files_still_count_as_file_upload() {
        let (_tmp, orchestrator) = orchestrator();
        let summary = orchestrator
            .handle(request(
                "2025-12-24",
                "",
                "caption",
                vec![RawAsset::from_bytes("virus.exe", b"MZ".to_vec())],
            ))
            .unwrap();

        assert_eq!(summary.slug, "2025-12-24");
        assert_eq!(summary.saved, 0);
        assert_eq!(summary.skipped, 1);
        assert!(summary.note_saved);
    }

    #[test]
    fn test_concurrent_uploads_share_slug_and_notes_stay_apart() {
        const WORKERS: usize = 8;
        let (_tmp, orchestrator) = orchestrator();
        let orchestrator = Arc::new(orchestrator);

        let handles: Vec<_> = (0..WORKERS)
            .map(|i| {
                let orchestrator = Arc::clone(&orchestrator);
                std::thread::spawn(move || {
                    let files = orchestrator
                        .handle(request(
                            "2025-12-24",
                            "",
                            "",
                            vec![RawAsset::from_bytes(
                                format!("shot-{i}.jpg"),
                                format!("bytes {i}").into_bytes(),
                            )],
                        ))
                        .unwrap();
                    let note = orchestrator
                        .handle(request("2025-12-24", "", &format!("note {i}"), vec![]))
                        .unwrap();
                    (files, note)
                })
            })
            .collect();

        let mut note_slugs = HashSet::new();
        for handle in handles {
            let (files, note) = handle.join().unwrap();
            assert_eq!(files.slug, "2025-12-24");
            assert_eq!(files.saved, 1);
            assert!(note.note_saved);
            note_slugs.insert(note.slug);
        }
        assert_eq!(note_slugs.len(), WORKERS);

        let listing = list_staging(orchestrator.archive_root()).unwrap();
        assert_eq!(listing.len(), WORKERS + 1);
        let shared = listing
            .iter()
            .find(|entry| entry.slug == "2025-12-24")
            .unwrap();
        assert_eq!(shared.files.len(), WORKERS);
        for i in 0..WORKERS {
            assert!(shared.files.contains(&format!("shot-{i}.jpg")));
        }
    }
}
