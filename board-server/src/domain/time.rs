//! Timestamp handling for the departures board.
//!
//! The API provides absolute timestamps such as `2025-10-26T10:15:00+01:00`.
//! Display and delay derivation both work on the *wall clock* of the source's
//! own offset: a departure scheduled at 10:15 Berlin time is shown as
//! `10:15` regardless of where the server runs.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Error returned when a timestamp string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimestampError {
    reason: &'static str,
}

/// Accepted formats for sources that omit the UTC offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an absolute timestamp, offset-aware where the source provides one.
///
/// RFC 3339 is tried first; a handful of naive formats are accepted as a
/// fallback and pinned to a zero offset, preserving the wall clock.
///
/// # Examples
///
/// ```
/// use board_server::domain::{format_hhmm, parse_timestamp};
///
/// let t = parse_timestamp("2025-10-26T10:15:00+01:00").unwrap();
/// assert_eq!(format_hhmm(&t), "10:15");
///
/// assert!(parse_timestamp("not a time").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(TimestampError {
        reason: "unrecognized date-time format",
    })
}

/// Format a timestamp as `HH:MM` in its own offset's wall clock.
pub fn format_hhmm(t: &DateTime<FixedOffset>) -> String {
    t.format("%H:%M").to_string()
}

/// Rounded difference `expected - scheduled` in whole minutes.
///
/// Computed on absolute instants, so timestamps carrying different offsets
/// compare correctly. Negative results (early departures) are returned
/// as-is; the normalizer clamps.
pub fn minutes_between(scheduled: &DateTime<FixedOffset>, expected: &DateTime<FixedOffset>) -> i64 {
    let seconds = expected.signed_duration_since(scheduled).num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rfc3339_with_offset() {
        let t = parse_timestamp("2025-10-26T10:15:00+01:00").unwrap();
        assert_eq!(format_hhmm(&t), "10:15");

        // Zulu suffix is an offset too.
        let t = parse_timestamp("2025-10-26T09:15:00Z").unwrap();
        assert_eq!(format_hhmm(&t), "09:15");
    }

    #[test]
    fn parse_naive_fallbacks() {
        assert_eq!(
            format_hhmm(&parse_timestamp("2025-10-26T10:15:00").unwrap()),
            "10:15"
        );
        assert_eq!(
            format_hhmm(&parse_timestamp("2025-10-26 10:15:00").unwrap()),
            "10:15"
        );
        assert_eq!(
            format_hhmm(&parse_timestamp("2025-10-26T10:15").unwrap()),
            "10:15"
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("tomorrow-ish").is_err());
        assert!(parse_timestamp("2025-13-99T99:99:99").is_err());
    }

    #[test]
    fn wall_clock_is_not_converted() {
        // 10:15 at +01:00 is 09:15 UTC, but the board shows the local wall clock.
        let t = parse_timestamp("2025-10-26T10:15:00+01:00").unwrap();
        assert_eq!(format_hhmm(&t), "10:15");
    }

    #[test]
    fn minutes_between_rounds() {
        let s = parse_timestamp("2025-10-26T10:00:00+01:00").unwrap();

        let e = parse_timestamp("2025-10-26T10:07:00+01:00").unwrap();
        assert_eq!(minutes_between(&s, &e), 7);

        // 90 seconds rounds up to 2 minutes.
        let e = parse_timestamp("2025-10-26T10:01:30+01:00").unwrap();
        assert_eq!(minutes_between(&s, &e), 2);

        // 20 seconds rounds down to 0.
        let e = parse_timestamp("2025-10-26T10:00:20+01:00").unwrap();
        assert_eq!(minutes_between(&s, &e), 0);
    }

    #[test]
    fn minutes_between_early_is_negative() {
        let s = parse_timestamp("2025-10-26T10:00:00+01:00").unwrap();
        let e = parse_timestamp("2025-10-26T09:58:00+01:00").unwrap();
        assert_eq!(minutes_between(&s, &e), -2);
    }

    #[test]
    fn minutes_between_mixed_offsets_uses_instants() {
        // Same instant expressed in two offsets: zero delay.
        let s = parse_timestamp("2025-10-26T10:00:00+01:00").unwrap();
        let e = parse_timestamp("2025-10-26T09:00:00Z").unwrap();
        assert_eq!(minutes_between(&s, &e), 0);
    }
}
