// Validation utilities module
// Provides custom validation functions for domain-specific rules

use chrono::{NaiveDate, Utc};
use validator::ValidationError;

/// Parses a calendar date in `YYYY-MM-DD` form.
/// Bookings are whole-day reservations, so no time component is accepted.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::new("invalid_calendar_date"))
}

/// Returns true when the date is strictly after today in UTC.
/// Same-day bookings are rejected: "today" is not bookable.
pub fn is_future_date(date: NaiveDate) -> bool {
    date > Utc::now().date_naive()
}

/// Validates that a date range is not inverted (start must not be after end)
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        Err(ValidationError::new("inverted_date_range"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_calendar_date("2026-09-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 15).unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        assert!(parse_calendar_date("not-a-date").is_err());
        assert!(parse_calendar_date("2026-13-01").is_err());
        assert!(parse_calendar_date("2026-02-30").is_err());
        assert!(parse_calendar_date("15/09/2026").is_err());
        assert!(parse_calendar_date("").is_err());
    }

    #[test]
    fn test_parse_rejects_datetime_input() {
        assert!(parse_calendar_date("2026-09-15T10:00:00Z").is_err());
    }

    #[test]
    fn test_today_is_not_a_future_date() {
        let today = Utc::now().date_naive();
        assert!(!is_future_date(today));
    }

    #[test]
    fn test_yesterday_is_not_a_future_date() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        assert!(!is_future_date(yesterday));
    }

    #[test]
    fn test_tomorrow_is_a_future_date() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        assert!(is_future_date(tomorrow));
    }

    #[test]
    fn test_date_range_accepts_equal_bounds() {
        let day = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        assert!(validate_date_range(day, day).is_ok());
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 16).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        assert!(validate_date_range(start, end).is_err());
    }
}
