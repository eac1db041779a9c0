use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Missing value tokens. Matched exactly, without trimming or case folding.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

type FormatPattern = (Regex, &'static [&'static str]);

fn pattern(re: &str, formats: &'static [&'static str]) -> FormatPattern {
    (Regex::new(re).unwrap(), formats)
}

// Date-only shapes and the formats to try for each, in order
static DATE_PATTERNS: Lazy<Vec<FormatPattern>> = Lazy::new(|| {
    vec![
        // ISO: 2024-01-15
        pattern(r"^\d{4}-\d{1,2}-\d{1,2}$", &["%Y-%m-%d"]),
        // 2024/01/15
        pattern(r"^\d{4}/\d{1,2}/\d{1,2}$", &["%Y/%m/%d"]),
        // 2024.01.15
        pattern(r"^\d{4}\.\d{1,2}\.\d{1,2}$", &["%Y.%m.%d"]),
        // US first, day-first when the month is out of range: 01/15/2024, 15/01/2024
        pattern(r"^\d{1,2}/\d{1,2}/\d{4}$", &["%m/%d/%Y", "%d/%m/%Y"]),
        pattern(r"^\d{1,2}-\d{1,2}-\d{4}$", &["%m-%d-%Y", "%d-%m-%Y"]),
        // Short year: 01/15/24
        pattern(r"^\d{1,2}/\d{1,2}/\d{2}$", &["%m/%d/%y", "%d/%m/%y"]),
        // European dotted: 15.01.2024
        pattern(r"^\d{1,2}\.\d{1,2}\.\d{4}$", &["%d.%m.%Y"]),
        // Month name first: Jan 15, 2024 / January 15 2024
        pattern(r"^[A-Za-z]{3,9}\.? \d{1,2},? \d{4}$", &["%b %d %Y", "%B %d %Y"]),
        // Day first: 15 Jan 2024 / 15 January, 2024
        pattern(r"^\d{1,2} [A-Za-z]{3,9}\.?,? \d{4}$", &["%d %b %Y", "%d %B %Y"]),
    ]
});

// Datetime shapes without an offset
static DATETIME_PATTERNS: Lazy<Vec<FormatPattern>> = Lazy::new(|| {
    vec![
        // 2024-01-15T10:30:00, 2024-01-15 10:30:00.123, 2024-01-15 10:30
        pattern(
            r"^\d{4}-\d{1,2}-\d{1,2}[T ]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?$",
            &[
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
            ],
        ),
        // 2024/01/15 10:30:00
        pattern(
            r"^\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{2}(:\d{2})?$",
            &["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"],
        ),
        // 01/15/2024 10:30:00
        pattern(
            r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}(:\d{2})?$",
            &[
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y %H:%M",
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
            ],
        ),
    ]
});

// Datetimes carrying a UTC offset or Z suffix
static OFFSET_DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})$").unwrap()
});

// Year and month only: 2024-01
static YEAR_MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}$").unwrap());

/// Check if a raw cell value is a missing value marker
pub fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

/// Parse a numeric value, tolerating surrounding whitespace.
/// NaN is reported as `None` since it can only stand for a missing value here.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Best-effort parse of a date or timestamp.
///
/// Offsets are normalized to UTC. Date-only values land on midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if OFFSET_DATETIME_PATTERN.is_match(trimmed) {
        return parse_with_offset(trimmed);
    }

    for (re, formats) in DATETIME_PATTERNS.iter() {
        if re.is_match(trimmed) {
            if let Some(dt) = formats
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
            {
                return Some(dt);
            }
        }
    }

    parse_date(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Best-effort parse of a date without a time component
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();

    if YEAR_MONTH_PATTERN.is_match(trimmed) {
        return NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d").ok();
    }

    // Month-name forms: collapse runs of whitespace, drop commas and abbreviation dots
    let normalized: String = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for (re, formats) in DATE_PATTERNS.iter() {
        if re.is_match(&normalized) {
            let cleaned = normalized.replace([',', '.'], "");
            let candidate = if normalized.chars().any(|c| c.is_ascii_alphabetic()) {
                cleaned.as_str()
            } else {
                normalized.as_str()
            };
            if let Some(date) = formats
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(candidate, f).ok())
            {
                return Some(date);
            }
        }
    }
    None
}

fn parse_with_offset(value: &str) -> Option<NaiveDateTime> {
    let with_t = value.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_t) {
        return Some(dt.naive_utc());
    }
    // Offsets written without a colon: +0200
    DateTime::parse_from_str(&with_t, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|dt| dt.naive_utc())
}
