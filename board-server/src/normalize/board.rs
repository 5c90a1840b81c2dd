//! Raw departures to the canonical, sorted board.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde_json::Value;

use crate::domain::{DisplayRecord, NOT_AVAILABLE, format_hhmm, minutes_between, parse_timestamp};

use super::resolve::{KeyPath, resolve, resolve_text};

/// A raw departure record as supplied by the API.
///
/// An associative record that *may* contain, under one of several
/// alternative keys, a line name, a direction, scheduled/expected times,
/// a delay in seconds, and a platform. No field is guaranteed present or
/// well-typed.
pub type RawDeparture = Value;

// Candidate key paths per logical attribute, first present non-null wins.
const LINE_PATHS: &[KeyPath] = &[&["line", "name"], &["line", "productName"]];
const DIRECTION_PATHS: &[KeyPath] = &[&["direction"], &["destination"]];
const SCHEDULED_PATHS: &[KeyPath] = &[&["plannedWhen"], &["scheduledTime"]];
const EXPECTED_PATHS: &[KeyPath] = &[&["when"], &["actualTime"]];
const DELAY_PATHS: &[KeyPath] = &[&["delay"]];
const PLATFORM_PATHS: &[KeyPath] = &[&["platform"], &["plannedPlatform"]];

/// Error that invalidates a single raw record.
///
/// A missing or null field is never an error (it resolves to `"N/A"` or a
/// zero delay); these arise only when a field is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record itself is not a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// A time field is present but not a string.
    #[error("{field} time is not a string")]
    TimeNotText { field: &'static str },

    /// A time field is present but cannot be parsed as a date-time.
    #[error("unparsable {field} time: {value:?}")]
    UnparsableTime {
        field: &'static str,
        value: String,
    },
}

/// Diagnostic for a record dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Index of the record in the raw input.
    pub index: usize,

    /// Human-readable reason the record was skipped.
    pub message: String,
}

/// Result of normalizing one fetch cycle.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBoard {
    /// Canonical records, sorted ascending by expected time.
    pub records: Vec<DisplayRecord>,

    /// One diagnostic per dropped input record.
    pub skipped: Vec<Diagnostic>,
}

/// Normalize a raw departure list into the canonical board.
///
/// `today` anchors the sort: expected times are stored only as `HH:MM`
/// strings, so a same-day timestamp is reconstructed purely for
/// comparison. A window crossing midnight therefore sorts post-midnight
/// departures first; the board assumes a same-day window.
///
/// A record that fails to process is dropped with a diagnostic and never
/// aborts the remaining records.
pub fn normalize(raw: &[RawDeparture], today: NaiveDate) -> NormalizedBoard {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for (index, departure) in raw.iter().enumerate() {
        match normalize_record(departure) {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(Diagnostic {
                index,
                message: e.to_string(),
            }),
        }
    }

    let records = sort_by_expected(records, today);

    NormalizedBoard { records, skipped }
}

/// Normalize a single raw record.
fn normalize_record(departure: &RawDeparture) -> Result<DisplayRecord, RecordError> {
    if !departure.is_object() {
        return Err(RecordError::NotAnObject);
    }

    let line = resolve_text(departure, LINE_PATHS).unwrap_or_else(not_available);
    let direction = resolve_text(departure, DIRECTION_PATHS).unwrap_or_else(not_available);
    let platform = resolve_text(departure, PLATFORM_PATHS).unwrap_or_else(not_available);

    let scheduled = resolve_time(departure, SCHEDULED_PATHS, "scheduled")?;
    let expected = resolve_time(departure, EXPECTED_PATHS, "expected")?.or(scheduled);

    let delay_minutes = match resolve(departure, DELAY_PATHS) {
        Some(value) => explicit_delay_minutes(value),
        None => match (&scheduled, &expected) {
            (Some(s), Some(e)) => minutes_between(s, e),
            _ => 0,
        },
    }
    // Early departures are zero delay, not "early arrival".
    .max(0);

    Ok(DisplayRecord {
        line,
        direction,
        scheduled: scheduled.as_ref().map(format_hhmm).unwrap_or_else(not_available),
        expected: expected.as_ref().map(format_hhmm).unwrap_or_else(not_available),
        delay_minutes,
        platform,
    })
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Resolve a timestamp attribute.
///
/// Absent or null resolves to `None` (shown as `"N/A"`); a present value
/// that is not a parsable date-time string invalidates the record.
fn resolve_time(
    departure: &RawDeparture,
    paths: &[KeyPath],
    field: &'static str,
) -> Result<Option<DateTime<FixedOffset>>, RecordError> {
    match resolve(departure, paths) {
        None => Ok(None),
        Some(Value::String(s)) => parse_timestamp(s)
            .map(Some)
            .map_err(|_| RecordError::UnparsableTime {
                field,
                value: s.clone(),
            }),
        Some(_) => Err(RecordError::TimeNotText { field }),
    }
}

/// Whole minutes from an explicit delay field, which holds seconds as an
/// integer or a numeric string. A present but non-numeric value counts as
/// zero delay; it does not fall back to time-difference derivation.
fn explicit_delay_minutes(value: &Value) -> i64 {
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    seconds.map(|s| s.div_euclid(60)).unwrap_or(0)
}

/// Sort records ascending by expected time, `"N/A"` last.
///
/// Expected times are reconstructed as `today + HH:MM` for comparison. If
/// any non-`"N/A"` expected string fails to reconstruct, the whole sort
/// falls back to lexicographic (expected, scheduled) order.
fn sort_by_expected(records: Vec<DisplayRecord>, today: NaiveDate) -> Vec<DisplayRecord> {
    let mut keyed = Vec::with_capacity(records.len());
    let mut unreconstructable = false;

    for record in records {
        let key = if record.expected == NOT_AVAILABLE {
            None
        } else {
            match NaiveTime::parse_from_str(&record.expected, "%H:%M") {
                Ok(time) => Some(today.and_time(time)),
                Err(_) => {
                    unreconstructable = true;
                    None
                }
            }
        };
        keyed.push((key, record));
    }

    if unreconstructable {
        let mut records: Vec<DisplayRecord> = keyed.into_iter().map(|(_, r)| r).collect();
        records.sort_by(|a, b| {
            a.expected
                .cmp(&b.expected)
                .then_with(|| a.scheduled.cmp(&b.scheduled))
        });
        return records;
    }

    // Stable sort: ties keep source order, so sorting is idempotent.
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 26).unwrap()
    }

    prop_compose! {
        fn valid_hhmm()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    prop_compose! {
        fn arbitrary_record()(
            expected in prop::option::of(valid_hhmm()),
            scheduled in prop::option::of(valid_hhmm()),
            delay in -10_000i64..10_000,
        ) -> DisplayRecord {
            DisplayRecord {
                line: "L".into(),
                direction: "D".into(),
                scheduled: scheduled.unwrap_or_else(|| NOT_AVAILABLE.into()),
                expected: expected.unwrap_or_else(|| NOT_AVAILABLE.into()),
                delay_minutes: delay.max(0),
                platform: NOT_AVAILABLE.into(),
            }
        }
    }

    proptest! {
        /// Explicit non-negative delay seconds floor-divide to minutes.
        #[test]
        fn explicit_delay_floor(seconds in 0i64..100_000) {
            let raw = vec![json!({"delay": seconds})];
            let board = normalize(&raw, today());
            prop_assert_eq!(board.records[0].delay_minutes, seconds / 60);
        }

        /// Delay is never negative, whatever the explicit field holds.
        #[test]
        fn delay_never_negative_explicit(seconds in -100_000i64..100_000) {
            let raw = vec![json!({"delay": seconds})];
            let board = normalize(&raw, today());
            prop_assert!(board.records[0].delay_minutes >= 0);
        }

        /// Delay is never negative when derived from time differences.
        #[test]
        fn delay_never_negative_derived(
            sched_min in 0i64..1440,
            exp_min in 0i64..1440,
        ) {
            let base = parse_timestamp("2025-10-26T00:00:00+01:00").unwrap();
            let sched = base + chrono::Duration::minutes(sched_min);
            let exp = base + chrono::Duration::minutes(exp_min);
            let raw = vec![json!({
                "plannedWhen": sched.to_rfc3339(),
                "when": exp.to_rfc3339(),
            })];

            let board = normalize(&raw, today());

            prop_assert!(board.records[0].delay_minutes >= 0);
            if exp_min >= sched_min {
                prop_assert_eq!(board.records[0].delay_minutes, exp_min - sched_min);
            }
        }

        /// Sorting an already-sorted board changes nothing.
        #[test]
        fn sort_idempotent(records in prop::collection::vec(arbitrary_record(), 0..20)) {
            let once = sort_by_expected(records, today());
            let twice = sort_by_expected(once.clone(), today());
            prop_assert_eq!(once, twice);
        }

        /// Records without a usable expected time always sort last.
        #[test]
        fn not_available_sorts_last(records in prop::collection::vec(arbitrary_record(), 0..20)) {
            let sorted = sort_by_expected(records, today());
            let first_na = sorted.iter().position(|r| r.expected == NOT_AVAILABLE);
            if let Some(idx) = first_na {
                prop_assert!(sorted[idx..].iter().all(|r| r.expected == NOT_AVAILABLE));
            }
        }
    }
}
