// Slug generation for jobs, articles and events
// Uniqueness comes from the millisecond suffix plus the unique index on the
// slug column; a collision inside the same millisecond surfaces as a conflict.

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Lowercase the title, collapse every non-alphanumeric run into a dash and
/// append the current Unix millisecond timestamp.
pub fn time_suffixed_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let base = dashed.trim_matches('-');

    format!("{}-{}", base, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_base_is_normalized() {
        let slug = time_suffixed_slug("Senior Rust Engineer (Remote!)");
        assert!(slug.starts_with("senior-rust-engineer-remote-"));

        let suffix = slug.rsplit('-').next().unwrap();
        assert!(suffix.parse::<i64>().is_ok(), "suffix must be a timestamp");
    }

    #[test]
    fn test_slug_trims_leading_and_trailing_separators() {
        let slug = time_suffixed_slug("  ¡Hola! Meetup  ");
        assert!(slug.starts_with("hola-meetup-"));
        assert!(!slug.starts_with('-'));
    }

    #[test]
    fn test_slug_handles_symbol_only_titles() {
        // Only the timestamp remains after normalization
        let slug = time_suffixed_slug("!!!");
        let suffix = slug.rsplit('-').next().unwrap();
        assert!(suffix.parse::<i64>().is_ok());
    }
}
