//! Staging directory slug resolution.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use regex::Regex;

/// Number of leading characters of the date input used as the date component.
const DATE_PREFIX_LEN: usize = 10;

static NON_SLUG_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").unwrap());
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Normalize free-form text into a lowercase, hyphen-delimited token.
///
/// Returns an empty string when nothing usable remains.
pub fn slugify(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let replaced = NON_SLUG_RUN.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUN.replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_string()
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    format_date(Utc::now().date_naive())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Shape of the request a slug is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadShape {
    pub has_files: bool,
    pub has_note: bool,
}

impl UploadShape {
    /// A note without any files.
    pub fn is_note_only(&self) -> bool {
        self.has_note && !self.has_files
    }
}

/// Computes staging directory names.
///
/// File-bearing uploads with the same date and slug resolve to the same
/// directory and merge. Note-only uploads get a random `-note-XXXX` suffix
/// with no check against existing directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugResolver;

impl SlugResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a slug against the current date and the thread-local RNG.
    pub fn resolve(&self, date: &str, custom_slug: &str, shape: UploadShape) -> String {
        self.resolve_with(
            Utc::now().date_naive(),
            &mut rand::thread_rng(),
            date,
            custom_slug,
            shape,
        )
    }

    /// Resolve a slug with an explicit "today" and random source.
    pub fn resolve_with<R: Rng>(
        &self,
        today: NaiveDate,
        rng: &mut R,
        date: &str,
        custom_slug: &str,
        shape: UploadShape,
    ) -> String {
        let base = base_slug(&format_date(today), date, custom_slug);

        if shape.is_note_only() {
            let suffix: u16 = rng.gen();
            format!("{}-note-{:04x}", base, suffix)
        } else {
            base
        }
    }
}

/// Slug from the date and custom token, without the note-only suffix.
fn base_slug(today: &str, date: &str, custom_slug: &str) -> String {
    let date = date_component(today, date);
    let token = slugify(custom_slug);

    if token.is_empty() {
        date
    } else if token.starts_with(&date) {
        token
    } else {
        format!("{}-{}", date, token)
    }
}

/// First ten characters of the supplied date, or today when blank.
///
/// The prefix is not checked for being a real date, only normalized so it is
/// a valid directory name.
fn date_component(today: &str, date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return today.to_string();
    }

    let prefix: String = date.chars().take(DATE_PREFIX_LEN).collect();
    let normalized = slugify(&prefix);
    if normalized.is_empty() {
        today.to_string()
    } else {
        normalized
    }
}
