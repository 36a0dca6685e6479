//! Shared utility functions used across multiple modules.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::error::{Error, Result};

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Random lowercase alphanumeric suffix of at most 32 characters.
pub fn random_suffix(len: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(len).collect()
}

/// Generate an entity id in the `<unix-ms>-<random>` form.
pub fn generate_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), random_suffix(8))
}

/// Derive an identifier from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Reject ids that cannot be used as a single path segment.
pub fn validate_path_id(id: &str, kind: &str) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{kind} id cannot be empty")));
    }
    if trimmed == "." || trimmed.contains("..") || trimmed.contains(['/', '\\']) {
        return Err(Error::InvalidInput(format!(
            "{kind} id '{id}' must not contain path separators"
        )));
    }
    Ok(())
}

/// Parse an ISO date (`YYYY-MM-DD`) or RFC 3339 date-time.
///
/// Date-only values resolve to midnight UTC.
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" Work ".to_string())),
            Some("Work".to_string())
        );
    }

    #[test]
    fn generate_id_has_timestamp_and_random_parts() {
        let id = generate_id();
        let (timestamp, random) = id.split_once('-').unwrap();
        assert!(timestamp.parse::<i64>().unwrap() > 0);
        assert_eq!(random.len(), 8);
        assert_ne!(generate_id(), id);
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Work"), "work");
        assert_eq!(slugify("  Side Projects!! 2024 "), "side-projects-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn validate_path_id_rejects_traversal() {
        assert!(validate_path_id("general", "Notebook").is_ok());
        assert!(validate_path_id("1700000000000-abcd1234", "Note").is_ok());
        assert!(validate_path_id("", "Notebook").is_err());
        assert!(validate_path_id("../etc", "Notebook").is_err());
        assert!(validate_path_id("a/b", "Note").is_err());
    }

    #[test]
    fn parse_iso_datetime_accepts_dates_and_datetimes() {
        let date = parse_iso_datetime("2024-05-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        let datetime = parse_iso_datetime("2024-05-01T10:30:00.000Z").unwrap();
        assert_eq!(datetime.to_rfc3339(), "2024-05-01T10:30:00+00:00");

        assert!(parse_iso_datetime("tomorrow").is_none());
    }
}
