//! Field coercion.
//!
//! Every parser here is total: a cell that is blank, holds a missing-value
//! token, or does not parse into its expected type becomes `None` instead of
//! an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::record::EmployeeId;

/// Placeholder spellings that mean "no value" in every column.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Date-only layouts accepted for `birth_date` and `hire_date`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// Datetime layouts carrying a `+HH:MM` / `-HH:MM` offset.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Datetime layouts without an offset; the time of day is discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns true if `raw` is blank or one of the missing-value tokens.
pub fn is_missing_token(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty() || MISSING_TOKENS.contains(&s)
}

/// Parses a calendar date, returning `None` for missing or unrecognised input.
///
/// Datetimes keep the calendar day as written; any offset is dropped rather
/// than applied.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if is_missing_token(raw) {
        return None;
    }
    let s = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date_naive());
    }

    let local = s.strip_suffix('Z').unwrap_or(s);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local, fmt).ok())
        .map(|dt| dt.date())
}

/// Parses a numeric cell. NaN is treated as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    if is_missing_token(raw) {
        return None;
    }
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Parses an identifier cell (`eid` or `reports_to`).
pub fn parse_id(raw: &str) -> Option<EmployeeId> {
    EmployeeId::parse(raw)
}

/// Parses an optional free-text cell, trimming it.
pub fn parse_text(raw: &str) -> Option<String> {
    if is_missing_token(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

/// Parses the `name` cell. Whitespace is kept; only missing tokens are `None`.
pub fn parse_name(raw: &str) -> Option<String> {
    if raw.is_empty() || MISSING_TOKENS.contains(&raw.trim()) {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("1990-01-15"), Some(date(1990, 1, 15)));
        assert_eq!(parse_date("1990/01/15"), Some(date(1990, 1, 15)));
        assert_eq!(parse_date("01/15/1990"), Some(date(1990, 1, 15)));
        assert_eq!(parse_date("19900115"), Some(date(1990, 1, 15)));
        assert_eq!(parse_date("  2020-03-01 "), Some(date(2020, 3, 1)));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(parse_date("2020-03-01 08:30:00"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-01T08:30:00Z"), Some(date(2020, 3, 1)));
        assert_eq!(
            parse_date("2020-03-01T08:30:00.250+02:00"),
            Some(date(2020, 3, 1))
        );
    }

    #[test]
    fn test_parse_date_offsets_keep_written_day() {
        assert_eq!(parse_date("2020-03-01T08:30:00-05:00"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-01T08:30:00+05:00"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-01 23:30:00-05:00"), Some(date(2020, 3, 1)));
        assert_eq!(parse_date("2020-03-01T00:15-08:00"), Some(date(2020, 3, 1)));
    }

    #[test]
    fn test_parse_date_invalid_is_missing() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2020-02-30"), None);
        assert_eq!(parse_date("13/45/2020"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("50000"), Some(50000.0));
        assert_eq!(parse_number(" -5 "), Some(-5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("$100"), None);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text(" Springfield "), Some("Springfield".to_string()));
        assert_eq!(parse_text(""), None);
        assert_eq!(parse_text("\t "), None);
    }

    #[test]
    fn test_missing_tokens() {
        for token in ["NA", "N/A", "n/a", "NULL", "null", "nan", "None", "#N/A", "<NA>", " NA "] {
            assert!(is_missing_token(token), "{token:?} should be missing");
            assert_eq!(parse_text(token), None);
            assert_eq!(parse_name(token), None);
            assert_eq!(parse_id(token), None);
            assert_eq!(parse_number(token), None);
            assert_eq!(parse_date(token), None);
        }
        assert!(!is_missing_token("Nadia"));
        assert!(!is_missing_token("na"));
        assert_eq!(parse_text("Nairobi"), Some("Nairobi".to_string()));
    }

    #[test]
    fn test_parse_name_keeps_whitespace() {
        assert_eq!(parse_name("   "), Some("   ".to_string()));
        assert_eq!(parse_name(" Ada "), Some(" Ada ".to_string()));
        assert_eq!(parse_name(""), None);
    }
}
