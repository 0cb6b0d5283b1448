//! Calendar-date helpers for daily notes. Dates carry no time of day or zone.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`; `None` if the string is not a valid calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The following calendar day; `None` only past `NaiveDate::MAX`.
pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}
