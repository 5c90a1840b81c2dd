//! Demo-mode fixtures for running without an API key.
//!
//! Two example stations and two example departures, shaped like real API
//! records so the same normalization path is exercised. Demo mode never
//! issues network calls.

use serde_json::json;

use crate::domain::StationCandidate;
use crate::normalize::RawDeparture;

/// Fixed station candidates served in demo mode, whatever the query.
pub fn demo_stations() -> Vec<StationCandidate> {
    vec![
        StationCandidate {
            id: Some("900000100001".to_string()),
            name: "Example Station A (Demo)".to_string(),
        },
        StationCandidate {
            id: Some("900000100002".to_string()),
            name: "Example Station B (Demo)".to_string(),
        },
    ]
}

/// Fixed raw departures served in demo mode: an on-time S1 and a U2
/// running one minute late.
pub fn demo_departures() -> Vec<RawDeparture> {
    vec![
        json!({
            "line": {"name": "S1"},
            "direction": "Destination A",
            "when": "2025-10-26T10:15:00+01:00",
            "plannedWhen": "2025-10-26T10:15:00+01:00",
            "delay": 0,
        }),
        json!({
            "line": {"name": "U2"},
            "direction": "Destination B",
            "when": "2025-10-26T10:18:00+01:00",
            "plannedWhen": "2025-10-26T10:17:00+01:00",
            "delay": 60,
        }),
    ]
}
