use chrono::{Local, NaiveDate};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Today's local date as `YYYY-MM-DD`.
#[must_use]
pub fn current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The local date and minute as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn current_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Check a manually entered `DD-MM-YYYY` date.
///
/// Only the exact ten-character form is accepted. The year must fall in
/// `1900..=2100` and the day must exist in that month (leap years included).
#[must_use]
pub fn is_valid_date(s: &str) -> bool {
    parse_entry_date(s).is_some()
}

/// Parse a `DD-MM-YYYY` date with the same rules as [`is_valid_date`].
#[must_use]
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let day: u32 = s[0..2].parse().ok()?;
    let month: u32 = s[3..5].parse().ok()?;
    let year: i32 = s[6..10].parse().ok()?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a date the way it is typed in and stored in the weight log.
#[must_use]
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Render a date as the `YYYY-MM-DD` key used by the water log.
#[must_use]
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
