//! Publication date normalization.
//!
//! Municipal listing pages print dates as numeric day-month-year strings
//! such as `20/02/2026`, `20-02-2026` or `20.02.2026`. This module turns them
//! into a canonical [`NaiveDateTime`] at midnight. Anything else, including
//! month-name forms like `20 febbraio 2026`, is reported as absent so the
//! caller can apply its own defaulting policy.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([/.-])(\d{1,2})([/.-])(\d{4})$").expect("static date regex")
});

/// Normalize a free-text date into a timestamp.
///
/// Returns `None` for empty input, unrecognized patterns, mixed separators
/// (`20/02-2026`) and impossible calendar dates (`32/01/2026`).
///
/// # Examples
///
/// ```ignore
/// let dt = normalize(" 20/02/2026 ").unwrap();
/// assert_eq!(dt.to_string(), "2026-02-20 00:00:00");
/// assert!(normalize("20 febbraio 2026").is_none());
/// ```
pub fn normalize(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let caps = NUMERIC_DATE.captures(&text)?;
    if caps[2] != caps[4] {
        debug!(%text, "Mixed date separators");
        return None;
    }

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[3].parse().ok()?;
    let year: i32 = caps[5].parse().ok()?;

    let parsed = NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0));
    if parsed.is_none() {
        debug!(%text, "Date out of calendar range");
    }
    parsed
}
