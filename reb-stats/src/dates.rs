//! Report date parsing and formatting.

use chrono::NaiveDate;

/// ISO calendar date format used by the store and the query string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compact "YYYYMMDD" format, accepted on input only.
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Format a date as "YYYY-MM-DD".
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a "YYYY-MM-DD" date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse either "YYYY-MM-DD" or "YYYYMMDD".
///
/// Query parameters come from hand-edited URLs, so both forms are accepted.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_date(s).or_else(|| {
        if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
            NaiveDate::parse_from_str(s, COMPACT_DATE_FORMAT).ok()
        } else {
            None
        }
    })
}

/// Short "MM/DD" label for table headers.
pub fn short_label(date: &NaiveDate) -> String {
    date.format("%m/%d").to_string()
}
