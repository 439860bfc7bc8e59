//! Display formatting for durations, receipt dates, and clock times.
//!
//! All receipt-facing strings are produced here so the rendering rules live
//! in exactly one place: durations as `"2h 5m"` / `"45m"`, dates as
//! `MM/DD/YY`, and generation timestamps as a 12-hour clock reading.

use chrono::{NaiveDate, NaiveDateTime};

/// Receipt date format (`08/07/26`).
pub const RECEIPT_DATE_FORMAT: &str = "%m/%d/%y";

/// 12-hour clock format with zero-padded hour (`08:15 PM`).
pub const CLOCK_TIME_FORMAT: &str = "%I:%M %p";

/// Format a duration in whole minutes for display.
///
/// Under an hour renders as `"{m}m"`; otherwise `"{h}h {m}m"`. No rounding.
/// Callers must pass a non-negative value, which the `u32` type guarantees.
pub fn format_time(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        format!("{mins}m")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// Format a receipt period boundary date as `MM/DD/YY`.
pub fn format_receipt_date(date: NaiveDate) -> String {
    date.format(RECEIPT_DATE_FORMAT).to_string()
}

/// Format the moment a receipt was generated as a 12-hour clock reading.
pub fn format_clock_time(moment: NaiveDateTime) -> String {
    moment.format(CLOCK_TIME_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn zero_minutes() {
        assert_eq!(format_time(0), "0m");
    }

    #[test]
    fn just_under_an_hour() {
        assert_eq!(format_time(59), "59m");
    }

    #[test]
    fn exactly_one_hour() {
        assert_eq!(format_time(60), "1h 0m");
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(format_time(125), "2h 5m");
    }

    #[test]
    fn large_durations_do_not_round() {
        assert_eq!(format_time(1439), "23h 59m");
        assert_eq!(format_time(10_080), "168h 0m");
    }

    #[test]
    fn receipt_date_is_two_digit_everything() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(format_receipt_date(date), "08/07/26");
    }

    #[test]
    fn clock_time_is_twelve_hour() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let evening = date.and_time(NaiveTime::from_hms_opt(20, 15, 0).unwrap());
        assert_eq!(format_clock_time(evening), "08:15 PM");

        let morning = date.and_time(NaiveTime::from_hms_opt(0, 5, 0).unwrap());
        assert_eq!(format_clock_time(morning), "12:05 AM");
    }
}
