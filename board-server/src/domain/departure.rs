//! Canonical departure record.

use serde::Serialize;

/// Placeholder for a field the normalizer could not resolve.
pub const NOT_AVAILABLE: &str = "N/A";

/// A normalized, display-ready departure.
///
/// Created fresh per fetch cycle from a raw API record, immutable after
/// normalization, and discarded when the board cache is invalidated.
/// Times are `HH:MM` wall-clock strings in the source timestamp's own
/// offset, or [`NOT_AVAILABLE`] when the source supplied nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    /// Line or product name (e.g. "S1", "U2").
    pub line: String,

    /// Direction or destination of the departure.
    pub direction: String,

    /// Scheduled departure, `HH:MM` or `"N/A"`.
    pub scheduled: String,

    /// Expected departure, `HH:MM` or `"N/A"`; falls back to scheduled
    /// when the source has no real-time estimate.
    pub expected: String,

    /// Delay in whole minutes. Never negative: early departures are
    /// reported as zero delay, not as "early arrival".
    pub delay_minutes: i64,

    /// Platform identifier, or `"N/A"`.
    pub platform: String,
}

impl DisplayRecord {
    /// Whether this departure carries a positive delay.
    pub fn is_delayed(&self) -> bool {
        self.delay_minutes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(delay_minutes: i64) -> DisplayRecord {
        DisplayRecord {
            line: "S1".into(),
            direction: "Destination A".into(),
            scheduled: "10:15".into(),
            expected: "10:15".into(),
            delay_minutes,
            platform: NOT_AVAILABLE.into(),
        }
    }

    #[test]
    fn delayed_flag() {
        assert!(!record(0).is_delayed());
        assert!(record(1).is_delayed());
    }
}
