//! # Business Dates
//!
//! Records store their date as a formatted `DD/MM/YYYY` string and the
//! daily/custom report filters compare those strings for equality; only
//! the monthly filter parses them back. This module is the single place
//! that knows the format.

use chrono::{Datelike, Local, NaiveDate};

/// Storage format for business dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date into the storage format.
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date, formatted for storage and equality filtering.
pub fn today_string() -> String {
    format(today())
}

/// Parses a stored date string. Returns `None` for records whose date
/// does not round-trip (they simply drop out of parsed-date filters).
pub fn parse(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Whether a stored date string falls in the given calendar month.
pub fn in_month(value: &str, year: i32, month: u32) -> bool {
    parse(value)
        .map(|d| d.year() == year && d.month() == month)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let formatted = format(date);
        assert_eq!(formatted, "04/08/2026");
        assert_eq!(parse(&formatted), Some(date));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("2026-08-04"), None);
        assert_eq!(parse("99/99/9999"), None);
    }

    #[test]
    fn test_in_month() {
        assert!(in_month("04/08/2026", 2026, 8));
        assert!(!in_month("04/08/2026", 2026, 7));
        assert!(!in_month("04/08/2026", 2025, 8));
        assert!(!in_month("not a date", 2026, 8));
    }

    #[test]
    fn test_today_string_matches_today() {
        assert_eq!(today_string(), format(today()));
    }
}
