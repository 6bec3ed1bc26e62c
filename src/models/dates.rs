//! Calendar dates are kept as fixed-width, zero-padded `YYYY-MM-DD` strings.
//!
//! With that format, lexicographic order on the strings equals chronological
//! order, which the due-for-review check relies on.

use crate::error::{Result, SageError};
use chrono::{Days, Local, NaiveDate};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, ISO_DATE_FORMAT)
        .map_err(|_| SageError::InvalidDate(date.to_string()))
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MAX)
}

pub fn sub_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MIN)
}
