//! Date utilities for compact statement dates ("01ENE", "15ago").
//!
//! Statement rows carry a two-digit day followed by a three-letter Spanish
//! month abbreviation and no year, so the caller supplies the year.

use chrono::NaiveDate;

/// Spanish month abbreviations, in calendar order.
pub const SPANISH_MONTHS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

/// Map a three-letter Spanish month abbreviation (any case) to its month number.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let upper = abbrev.to_uppercase();
    SPANISH_MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|i| i as u32 + 1)
}

/// Parse a compact date like "01ENE" in the given year.
///
/// The first two characters are the day, the next three the month. Anything
/// after the fifth character is ignored. Returns `None` for an unknown month
/// or a day that does not exist in that month/year.
pub fn parse_compact_date(text: &str, year: i32) -> Option<NaiveDate> {
    let mut chars = text.chars();
    let day: String = chars.by_ref().take(2).collect();
    let month: String = chars.take(3).collect();

    let month = month_from_abbrev(&month)?;
    let day: u32 = day.trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YYYY-MM` key used for monthly buckets. Lexicographic order is chronological.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_table_is_case_insensitive() {
        assert_eq!(month_from_abbrev("ENE"), Some(1));
        assert_eq!(month_from_abbrev("ago"), Some(8));
        assert_eq!(month_from_abbrev("Dic"), Some(12));
        assert_eq!(month_from_abbrev("SET"), None);
        assert_eq!(month_from_abbrev("JAN"), None);
    }

    #[test]
    fn test_parse_compact_date() {
        let d = parse_compact_date("01ENE", 2025).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let d = parse_compact_date("15ago", 2025).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
    }

    #[test]
    fn test_trailing_text_ignored() {
        let d = parse_compact_date("03MAR 10:42", 2024).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_compact_date("99XYZ", 2025), None);
        assert_eq!(parse_compact_date("31ABR", 2025), None);
        assert_eq!(parse_compact_date("00ENE", 2025), None);
        assert_eq!(parse_compact_date("", 2025), None);
        assert_eq!(parse_compact_date("1", 2025), None);
        assert_eq!(parse_compact_date("xxENE", 2025), None);
    }

    #[test]
    fn test_leap_day_depends_on_year() {
        assert!(parse_compact_date("29FEB", 2024).is_some());
        assert!(parse_compact_date("29FEB", 2025).is_none());
    }

    #[test]
    fn test_month_key() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(month_key(d), "2025-03");
    }
}
