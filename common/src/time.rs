//! Time utilities for the Sarraf back office.

use chrono::{DateTime, NaiveDate, Utc};

/// A timestamp with timezone (always UTC for Sarraf).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Calendar day of a timestamp, used for report bucketing.
pub fn day_of(timestamp: Timestamp) -> NaiveDate {
    timestamp.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_of() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap();
        assert_eq!(day_of(ts), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }
}
