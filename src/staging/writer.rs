//! Committing assets and notes into staging directories.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::ensure_dir;
use crate::staging::state::UploadTally;

/// Fixed name of the note file inside a staging directory.
pub const NOTE_FILENAME: &str = "note.md";

/// A resolved staging directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingDirectory {
    pub slug: String,
    pub path: PathBuf,
}

/// An asset written into a staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAsset {
    pub sanitized_name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// An asset that passed sanitization and extension filtering.
pub struct AcceptedAsset<'a> {
    pub sanitized_name: String,
    pub content: &'a mut (dyn Read + Send),
}

/// Writes into staging directories under one archive root.
///
/// Writes are last-write-wins: an existing file with the same name is
/// truncated and replaced. Nothing is ever deleted.
#[derive(Debug, Clone)]
pub struct StagingWriter {
    archive_root: PathBuf,
}

impl StagingWriter {
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
        }
    }

    pub fn archive_root(&self) -> &Path {
        &self.archive_root
    }

    /// Create `archive_root/slug` if needed.
    pub fn ensure_dir(&self, slug: &str) -> Result<StagingDirectory> {
        let path = self.archive_root.join(slug);
        ensure_dir(&path)?;

        Ok(StagingDirectory {
            slug: slug.to_string(),
            path,
        })
    }

    /// Stream one asset into the directory, replacing any previous file.
    ///
    /// On error a partially written file may remain.
    pub fn write_asset(
        &self,
        dir: &StagingDirectory,
        sanitized_name: &str,
        content: &mut (dyn Read + Send),
    ) -> Result<PersistedAsset> {
        let path = dir.path.join(sanitized_name);
        let mut out = BufWriter::new(File::create(&path)?);
        let bytes = io::copy(content, &mut out)?;
        out.flush()?;

        Ok(PersistedAsset {
            sanitized_name: sanitized_name.to_string(),
            path,
            bytes,
        })
    }

    /// Write the note with a trailing newline, replacing any previous note.
    ///
    /// Blank notes are not written and return `None`.
    pub fn write_note(&self, dir: &StagingDirectory, note: &str) -> Result<Option<PathBuf>> {
        if note.trim().is_empty() {
            return Ok(None);
        }

        let path = dir.path.join(NOTE_FILENAME);
        std::fs::write(&path, format!("{}\n", note))?;
        Ok(Some(path))
    }

    /// Write every accepted asset and the note, recording outcomes in `tally`.
    ///
    /// A failed unit does not stop the others and nothing already written is
    /// rolled back.
    pub fn commit(
        &self,
        dir: &StagingDirectory,
        assets: Vec<AcceptedAsset<'_>>,
        note: &str,
        tally: &mut UploadTally,
    ) {
        for asset in assets {
            match self.write_asset(dir, &asset.sanitized_name, asset.content) {
                Ok(persisted) => {
                    tracing::debug!(
                        "Saved {} ({} bytes)",
                        persisted.path.display(),
                        persisted.bytes
                    );
                    tally.increment_saved();
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to write {} into {}: {}",
                        asset.sanitized_name,
                        dir.slug,
                        e
                    );
                    tally.increment_failed();
                }
            }
        }

        match self.write_note(dir, note) {
            Ok(Some(path)) => {
                tracing::debug!("Saved note {}", path.display());
                tally.mark_note_saved();
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to write note into {}: {}", dir.slug, e);
            }
        }
    }
}
