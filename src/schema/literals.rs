//! Date and numeric literal parsing
//!
//! Accepted date forms (value is trimmed first):
//! - RFC 3339 timestamps (`2024-01-22T13:45:00Z`, `...+02:00`), normalized to UTC
//! - ISO and slash year-first dates, with optional time
//! - Day-first dates (`31/05/1976`, `31-05-1976`), then month-first (`05/31/1976`)
//! - Month names (`31 May 1976`, `May 31, 1976`, `31 Jan 1976`)
//! - Two-digit years, month-first then day-first (`10/11/12` is
//!   2012-10-11); years 00-68 map to 20xx and 69-99 to 19xx
//!
//! Four-digit year forms reject years below 1000, so a short year never
//! reads as a first-century date. Bare integers are never dates.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Smallest year accepted from a `%Y` form
const MIN_FULL_YEAR: i32 = 1000;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const SHORT_YEAR_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%d/%m/%y",
    "%m-%d-%y",
    "%d-%m-%y",
    "%m.%d.%y",
    "%d.%m.%y",
];

fn full_year(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    (dt.year() >= MIN_FULL_YEAR).then_some(dt)
}

/// Parses a date or date-time literal.
///
/// Dates without a time component resolve to midnight.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() || s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetimes = DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());
    let dates = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .filter_map(|d| d.and_hms_opt(0, 0, 0));
    if let Some(dt) = datetimes.chain(dates).find_map(full_year) {
        return Some(dt);
    }

    SHORT_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a numeric literal (integer, decimal or exponent form).
///
/// NaN is rejected since it has no ordering.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_iso_date() {
        let dt = parse_date("1976-05-31").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1976, 5, 31));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_day_first_before_month_first() {
        let dt = parse_date("04/05/2020").unwrap();
        assert_eq!((dt.day(), dt.month()), (4, 5));

        // Only valid month-first
        let dt = parse_date("05/31/1976").unwrap();
        assert_eq!((dt.month(), dt.day()), (5, 31));
    }

    #[test]
    fn test_rfc3339_normalized_to_utc() {
        let dt = parse_date("2024-01-22T13:45:00+02:00").unwrap();
        assert_eq!(dt.hour(), 11);
    }

    #[test]
    fn test_month_names() {
        assert!(parse_date("31 May 1976").is_some());
        assert!(parse_date("May 31, 1976").is_some());
        assert!(parse_date("31 Jan 1976").is_some());
    }

    #[test]
    fn test_bare_integers_are_not_dates() {
        assert!(parse_date("37").is_none());
        assert!(parse_date("19760531").is_none());
    }

    #[test]
    fn test_two_digit_years_use_pivot() {
        let dt = parse_date("10/11/12").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2012, 10, 11));

        let dt = parse_date("1-2-3").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2003, 1, 2));

        let dt = parse_date("1.5.20").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, 1, 5));

        // Only valid day-first
        let dt = parse_date("31/05/76").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1976, 5, 31));
    }

    #[test]
    fn test_short_years_never_first_century() {
        for raw in ["10/11/12", "1.5.20", "1-2-3", "0099-01-01", "5/6/7 10:00"] {
            if let Some(dt) = parse_date(raw) {
                assert!(dt.year() >= 1969, "{} parsed as {}", raw, dt);
            }
        }
    }

    #[test]
    fn test_text_is_not_a_date() {
        assert!(parse_date("malibu").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(parse_numeric("37"), Some(37.0));
        assert_eq!(parse_numeric(" -1.5 "), Some(-1.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("gold"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
