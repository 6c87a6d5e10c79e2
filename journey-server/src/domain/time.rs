//! Timestamp and calendar-day handling.
//!
//! The statistics API sends ISO-8601 timestamps as strings, and the
//! dashboard filters by calendar day. Days are interpreted in UTC: a day
//! starts at 00:00:00.000 and ends at 23:59:59.999.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Error returned when parsing an invalid timestamp or date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`2024-12-01T08:00:00Z`, `2024-12-01T08:00:00+01:00`)
/// and zone-less timestamps (`2024-12-01T08:00:00`), which are read as UTC.
///
/// # Examples
///
/// ```
/// use journey_server::domain::parse_instant;
///
/// let t = parse_instant("2024-12-01T09:00:00+01:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-12-01T08:00:00+00:00");
///
/// assert!(parse_instant("yesterday").is_err());
/// ```
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new(s, "empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| TimeError::new(s, "expected an ISO-8601 timestamp"))
}

/// Parse a calendar day.
///
/// Accepts `YYYY-MM-DD`, or any timestamp accepted by [`parse_instant`],
/// in which case its UTC calendar day is used.
///
/// # Examples
///
/// ```
/// use journey_server::domain::parse_day;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
/// assert_eq!(parse_day("2024-12-05").unwrap(), day);
/// assert_eq!(parse_day("2024-12-05T18:30:00Z").unwrap(), day);
/// assert!(parse_day("05/12/2024").is_err());
/// ```
pub fn parse_day(s: &str) -> Result<NaiveDate, TimeError> {
    let trimmed = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day);
    }
    parse_instant(trimmed)
        .map(|t| t.date_naive())
        .map_err(|_| TimeError::new(trimmed, "expected YYYY-MM-DD"))
}

/// First instant of a calendar day (midnight UTC).
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of a calendar day (23:59:59.999 UTC).
pub fn day_end(day: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(last).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_rfc3339_utc() {
        let t = parse_instant("2024-12-01T08:00:00Z").unwrap();
        assert_eq!(t.date_naive(), day(2024, 12, 1));
        assert_eq!(t.hour(), 8);
    }

    #[test]
    fn parse_rfc3339_with_offset_normalises_to_utc() {
        let t = parse_instant("2024-12-01T00:30:00+02:00").unwrap();
        assert_eq!(t.date_naive(), day(2024, 11, 30));
        assert_eq!(t.hour(), 22);
    }

    #[test]
    fn parse_fractional_seconds() {
        let t = parse_instant("2025-06-10T12:00:00.250+00:00").unwrap();
        assert_eq!(t.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn parse_zoneless_as_utc() {
        let t = parse_instant("2024-12-01T08:00:00").unwrap();
        assert_eq!(t, parse_instant("2024-12-01T08:00:00Z").unwrap());
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_instant("").is_err());
        assert!(parse_instant("   ").is_err());
        assert!(parse_instant("not a time").is_err());
        assert!(parse_instant("2024-13-01T00:00:00Z").is_err());
    }

    #[test]
    fn parse_day_formats() {
        assert_eq!(parse_day("2024-12-31").unwrap(), day(2024, 12, 31));
        assert_eq!(parse_day(" 2024-12-31 ").unwrap(), day(2024, 12, 31));
        assert_eq!(parse_day("2024-12-31T23:00:00Z").unwrap(), day(2024, 12, 31));
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn day_bounds() {
        let d = day(2024, 12, 5);
        assert_eq!(day_start(d), parse_instant("2024-12-05T00:00:00Z").unwrap());
        assert_eq!(day_end(d), parse_instant("2024-12-05T23:59:59.999Z").unwrap());
        assert_eq!(day_end(d) + Duration::milliseconds(1), day_start(day(2024, 12, 6)));
    }

    #[test]
    fn error_display_mentions_input() {
        let err = parse_instant("soon").unwrap_err();
        assert!(err.to_string().contains("\"soon\""));
    }
}
