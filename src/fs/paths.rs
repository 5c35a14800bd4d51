//! Path and directory management.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Maximum number of file names reported per staging directory.
pub const MAX_LISTED_FILES: usize = 200;

/// One staging directory as seen by the debug listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagingEntry {
    pub slug: String,
    pub files: Vec<String>,
}

/// Ensure a directory exists, creating it and its ancestors if necessary.
///
/// An existing directory is not an error, including when another request
/// creates it concurrently.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// List the staging directories under `archive_root`, sorted by slug.
///
/// Non-directory entries are ignored. Each directory reports its regular
/// files sorted by name, truncated to [`MAX_LISTED_FILES`].
pub fn list_staging(archive_root: &Path) -> Result<Vec<StagingEntry>> {
    if !archive_root.is_dir() {
        return Err(Error::ArchiveNotFound(archive_root.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(archive_root)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        let slug = entry.file_name().to_string_lossy().into_owned();
        entries.push(StagingEntry {
            slug,
            files: list_files(&path)?,
        });
    }

    entries.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(entries)
}

fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    files.sort();
    files.truncate(MAX_LISTED_FILES);
    Ok(files)
}
