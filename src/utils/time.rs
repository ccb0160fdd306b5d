//! Time utilities

use chrono::{DateTime, Duration, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a datetime string in RFC 3339 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Round a duration to the nearest whole minute, halves away from zero
pub fn round_to_minutes(duration: Duration) -> i64 {
    const MINUTE_MS: i64 = 60_000;

    let ms = duration.num_milliseconds();
    let minutes = (ms.abs() + MINUTE_MS / 2) / MINUTE_MS;
    if ms < 0 { -minutes } else { minutes }
}

/// Whole minutes from `from` to `to`, rounded to nearest
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    round_to_minutes(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2023-07-02T12:00:10Z");
        assert!(dt.is_some());

        let offset = parse_datetime("2023-07-02T14:00:10+02:00");
        assert_eq!(dt, offset);

        let invalid = parse_datetime("not a date");
        assert!(invalid.is_none());

        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_round_to_minutes() {
        assert_eq!(round_to_minutes(Duration::seconds(10)), 0);
        assert_eq!(round_to_minutes(Duration::seconds(29)), 0);
        assert_eq!(round_to_minutes(Duration::seconds(30)), 1);
        assert_eq!(round_to_minutes(Duration::seconds(70)), 1);
        assert_eq!(round_to_minutes(Duration::seconds(55 * 60 + 10)), 55);
        assert_eq!(round_to_minutes(Duration::seconds(-30)), -1);
        assert_eq!(round_to_minutes(Duration::seconds(-29)), 0);
    }

    #[test]
    fn test_minutes_between() {
        let start = parse_datetime("2023-07-02T12:00:00Z").unwrap();
        let later = parse_datetime("2023-07-02T12:50:00Z").unwrap();
        assert_eq!(minutes_between(start, later), 50);
        assert_eq!(minutes_between(later, start), -50);
    }
}
