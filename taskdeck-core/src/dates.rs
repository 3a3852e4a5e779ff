//! Due-date conversions at the form and display boundaries.
//!
//! A date-picker field holds a calendar date (`YYYY-MM-DD`); the wire
//! carries an end-of-day UTC instant; read-only views show `Mon D, YYYY`.
//! The picker/wire conversions are inverses with respect to the calendar
//! day — time-of-day below the day is intentionally lost on the way back
//! into the form.

use chrono::{DateTime, NaiveDate, Utc};

/// Converts a calendar date (`YYYY-MM-DD`) to an end-of-day UTC instant
/// (`YYYY-MM-DDT23:59:59.999Z`).
///
/// Returns `None` when the input is not a valid calendar date.
#[must_use]
pub fn end_of_day_utc(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let instant = day.and_hms_milli_opt(23, 59, 59, 999)?;
    Some(instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Extracts the calendar-date portion (`YYYY-MM-DD`) of a stored ISO-8601
/// due date, for pre-filling a date-picker field.
///
/// Returns `None` when the input does not parse as a date-time.
#[must_use]
pub fn date_input_value(iso: &str) -> Option<String> {
    let instant = DateTime::parse_from_rfc3339(iso).ok()?;
    Some(
        instant
            .with_timezone(&Utc)
            .format("%Y-%m-%d")
            .to_string(),
    )
}

/// Renders a stored due date as `Mon D, YYYY` (e.g. "Oct 1, 2023") for
/// read-only display.
///
/// Falls back to returning the input unchanged when it does not parse, so
/// a malformed date degrades to showing the raw value instead of erroring.
#[must_use]
pub fn format_display(iso: &str) -> String {
    if let Ok(instant) = DateTime::parse_from_rfc3339(iso) {
        return instant.with_timezone(&Utc).format("%b %-d, %Y").to_string();
    }
    // Plain calendar dates also occur (date-picker values shown unedited).
    if let Ok(day) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return day.format("%b %-d, %Y").to_string();
    }
    iso.to_string()
}
