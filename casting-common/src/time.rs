//! Date utilities for birth dates and ages

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Ages at or above this are treated as data-entry mistakes
pub const MAX_AGE_YEARS: i32 = 120;

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a birth date cell as written by the sign-up forms
///
/// Accepts RFC 3339 timestamps (what the endpoint emits for date cells),
/// ISO dates with an optional time part, `YYYY/MM/DD`, and slash dates
/// read day-first, falling back to month-first when the day-first
/// reading is not a real date.
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    // "1990-06-15", "1990-06-15 00:00:00", "1990-06-15T03:00:00"
    let date_part = text
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or(text);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y/%m/%d") {
        return Some(date);
    }

    NaiveDate::parse_from_str(date_part, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%m/%d/%Y"))
        .ok()
}

/// Whole years elapsed between `birth` and `today`
///
/// Counts a year only once the birthday has been reached this year.
/// Returns `None` for results outside `[0, MAX_AGE_YEARS)`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    if (0..MAX_AGE_YEARS).contains(&age) {
        Some(age as u32)
    } else {
        None
    }
}

/// Parse a birth date cell and compute the age it implies on `today`
pub fn age_from_birth_date(text: &str, today: NaiveDate) -> Option<u32> {
    parse_birth_date(text).and_then(|birth| age_on(birth, today))
}
