//! Filename sanitization and extension filtering.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::default_allowed_extensions;

/// Maximum length of a sanitized filename.
pub const MAX_FILENAME_LENGTH: usize = 200;

/// Name used when nothing usable is left after sanitizing.
pub const PLACEHOLDER_FILENAME: &str = "file";

static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Turn an untrusted client-supplied name into a safe filename.
///
/// Only the final path segment is kept (both `/` and `\` count as
/// separators), every run of characters outside `[A-Za-z0-9._-]` becomes a
/// single `_`, and the result is capped at [`MAX_FILENAME_LENGTH`]. Names
/// that end up empty, `.` or `..` become [`PLACEHOLDER_FILENAME`].
///
/// The function is total and idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let last_segment = name
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("");

    let mut sanitized = DISALLOWED_RUN.replace_all(last_segment, "_").into_owned();

    // Only ASCII remains, so byte truncation is char-safe.
    sanitized.truncate(MAX_FILENAME_LENGTH);

    match sanitized.as_str() {
        "" | "." | ".." => PLACEHOLDER_FILENAME.to_string(),
        _ => sanitized,
    }
}

/// Allow-list of file extensions that may be staged.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    allowed: HashSet<String>,
}

impl ExtensionFilter {
    /// Build a filter from configured extensions.
    ///
    /// Entries may carry a leading dot and any case.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        let allowed = extensions
            .iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self { allowed }
    }

    /// Whether the lower-cased extension of `filename` is allowed.
    pub fn accepts(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.allowed.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(&default_allowed_extensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("photo.JPG"), "photo.JPG");
        assert_eq!(sanitize_filename("my-clip_01.mp4"), "my-clip_01.mp4");
    }

    #[test]
    fn test_sanitize_filename_collapses_runs() {
        assert_eq!(sanitize_filename("my holiday  pic!!.png"), "my_holiday_pic_.png");
        assert_eq!(sanitize_filename("café.jpg"), "caf_.jpg");
        assert_eq!(sanitize_filename("tab\there\nnewline.gif"), "tab_here_newline.gif");
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\IMG_1.HEIC"), "IMG_1.HEIC");
        assert_eq!(sanitize_filename("dir/sub/"), "sub");
    }

    #[test]
    fn test_sanitize_filename_placeholder() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("/"), "file");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename("a/.."), "file");
        assert_eq!(sanitize_filename("."), "file");
    }

    #[test]
    fn test_sanitize_filename_length_cap() {
        let long = format!("{}.jpg", "a".repeat(500));
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized.len(), MAX_FILENAME_LENGTH);
        assert!(sanitized.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_sanitize_filename_idempotent() {
        let inputs = [
            "photo.JPG",
            "../x y/z?.png",
            "",
            "..",
            "日本語.mov",
            "a\\b\\c d.webp",
            &"x".repeat(300),
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {:?}", input);
            assert!(!once.is_empty() && once.len() <= MAX_FILENAME_LENGTH);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        }
    }

    #[test]
    fn test_extension_filter_default_list() {
        let filter = ExtensionFilter::default();
        for name in [
            "a.jpg", "a.jpeg", "a.png", "a.avif", "a.gif", "a.webp", "a.heic", "a.mov", "a.mp4",
        ] {
            assert!(filter.accepts(name), "{}", name);
        }
        assert!(!filter.accepts("a.exe"));
        assert!(!filter.accepts("a.jpg.exe"));
        assert!(!filter.accepts("jpg"));
        assert!(!filter.accepts(".jpg"));
        assert!(!filter.accepts("photo."));
        assert!(!filter.accepts("file"));
    }

    #[test]
    fn test_extension_filter_case_insensitive() {
        let filter = ExtensionFilter::default();
        assert!(filter.accepts("FOO.JPG"));
        assert!(filter.accepts("clip.Mov"));
    }

    #[test]
    fn test_extension_filter_configured() {
        let filter = ExtensionFilter::new(&[".PDF", "txt"]);
        assert!(filter.accepts("report.pdf"));
        assert!(filter.accepts("notes.TXT"));
        assert!(!filter.accepts("photo.jpg"));
    }
}
