//! Per-request staging outcome tracking.

use serde::Serialize;

/// Counters for one upload request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadTally {
    pub saved: u64,
    pub skipped: u64,
    pub failed: u64,
    pub note_saved: bool,
}

impl UploadTally {
    /// Increment saved asset count.
    pub fn increment_saved(&mut self) {
        self.saved += 1;
    }

    /// Increment skipped asset count.
    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Increment failed write count.
    pub fn increment_failed(&mut self) {
        self.failed += 1;
    }

    /// Record that the note file was written.
    pub fn mark_note_saved(&mut self) {
        self.note_saved = true;
    }
}

/// Result of one upload, returned to the HTTP caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub slug: String,
    pub saved: u64,
    pub skipped: u64,
    pub failed: u64,
    pub note_saved: bool,
}

impl UploadSummary {
    pub fn new(slug: String, tally: &UploadTally) -> Self {
        Self {
            slug,
            saved: tally.saved,
            skipped: tally.skipped,
            failed: tally.failed,
            note_saved: tally.note_saved,
        }
    }

    /// Human-readable feedback line for the uploader.
    pub fn message(&self) -> String {
        match (self.saved > 0, self.note_saved) {
            (true, true) => format!(
                "Uploaded {} file(s) + note to {}. It will publish automatically.",
                self.saved, self.slug
            ),
            (true, false) => format!(
                "Uploaded {} file(s) to {}. It will publish automatically.",
                self.saved, self.slug
            ),
            (false, true) => format!(
                "Saved note-only post: {}. It will publish automatically.",
                self.slug
            ),
            (false, false) => "Nothing saved. Check file types.".to_string(),
        }
    }
}
