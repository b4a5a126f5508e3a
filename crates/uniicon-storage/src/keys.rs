//! Shared key generation for archive backends.
//!
//! Key format: `images/{slug}_{timestamp}.png`. The suffix is fixed for every
//! image format; the stored content type carries the real format.

use chrono::{DateTime, SecondsFormat, Utc};

/// Prefix every archived icon lives under
pub const ARCHIVE_PREFIX: &str = "images";

/// File suffix of every archived icon
pub const ARCHIVE_EXTENSION: &str = "png";

const SLUG_MAX_CHARS: usize = 50;

/// Reduce a prompt to a key-safe slug: every character outside `[A-Za-z0-9]`
/// becomes `_`, capped at 50 characters.
pub fn prompt_slug(prompt: &str) -> String {
    prompt
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// Build the archive key for an icon generated from `prompt` at `at`.
pub fn archive_key(prompt: &str, at: DateTime<Utc>) -> String {
    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!(
        "{}/{}_{}.{}",
        ARCHIVE_PREFIX,
        prompt_slug(prompt),
        timestamp,
        ARCHIVE_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slug_replaces_non_alphanumerics() {
        assert_eq!(prompt_slug("a blue star!"), "a_blue_star_");
        assert_eq!(prompt_slug("café"), "caf_");
    }

    #[test]
    fn test_slug_is_capped() {
        let slug = prompt_slug(&"x".repeat(120));
        assert_eq!(slug.len(), 50);
    }

    #[test]
    fn test_archive_key_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let key = archive_key("red heart", at);
        assert_eq!(key, "images/red_heart_2024-03-09T14-05-07-000Z.png");
        assert!(!key.contains(':'));
    }

    #[test]
    fn test_archive_key_suffix_is_png() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(archive_key("icon", at), "images/icon_2024-01-01T00-00-00-000Z.png");
    }
}
