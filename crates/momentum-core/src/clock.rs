//! Calendar-date sources.
//!
//! Momentum only cares about whole calendar days, so the clock yields a
//! `NaiveDate` rather than an instant.

use chrono::{NaiveDate, Utc};

use crate::error::ValidationError;

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the UTC calendar date, matching the dates the
/// mobile app stores in `lastActiveDate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date. Used by tests and `--today` overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Signed number of calendar days from `from` to `to`.
/// Negative when `to` is earlier than `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn parses_iso_calendar_dates() {
        assert_eq!(date("2024-03-05"), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(date(" 2024-03-05 "), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("03/05/2024").is_err());
        assert!(parse_date("2024-03-05T10:00:00Z").is_err());
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date("2024-01-30"), date("2024-02-02")), 3);
        assert_eq!(days_between(date("2024-02-02"), date("2024-01-30")), -3);
        assert_eq!(days_between(date("2024-02-02"), date("2024-02-02")), 0);
    }

    #[test]
    fn system_clock_uses_utc_date() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(today == before || today == after);
    }

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let clock = FixedClock(date("2023-12-31"));
        assert_eq!(clock.today(), date("2023-12-31"));
    }
}
