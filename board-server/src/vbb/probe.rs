//! Defensive probing of loosely-structured API responses.
//!
//! The exact response shape is not fixed: the payload list may sit at the
//! top level or nested under one of several conventional keys, and search
//! hits mix stations with other location types. Both clients share the
//! probing strategy here.

use serde_json::Value;

use crate::domain::StationCandidate;

/// Container keys probed, in order, for the station search response.
pub const STATION_CONTAINER_KEYS: &[&str] = &["locations", "stopLocations", "station"];

/// Container keys probed, in order, for the departures response.
pub const DEPARTURE_CONTAINER_KEYS: &[&str] = &["departures", "journeys", "connections"];

/// Find the payload list in a response body.
///
/// A top-level array wins outright; otherwise the first candidate key
/// holding an array.
pub fn find_list<'a>(body: &'a Value, container_keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Some(list) = body.as_array() {
        return Some(list);
    }

    let object = body.as_object()?;
    container_keys
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
}

/// Whether a search hit looks like a station: an explicit type marker
/// meaning "stop", or any entry carrying an identifier.
pub fn looks_like_station(entry: &Value) -> bool {
    let Some(object) = entry.as_object() else {
        return false;
    };

    object.get("type").and_then(Value::as_str) == Some("stop") || object.contains_key("id")
}

/// Reduce a station-like entry to `{id, name}`.
///
/// Numeric ids are stringified; a missing name gets a placeholder so the
/// entry still renders.
pub fn reduce_station(entry: &Value) -> StationCandidate {
    let id = match entry.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown Name".to_string());

    StationCandidate { id, name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_array_wins() {
        let body = json!([{"id": "1"}, {"id": "2"}]);
        let list = find_list(&body, STATION_CONTAINER_KEYS).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn first_matching_container_key_wins() {
        let body = json!({
            "stopLocations": [{"id": "late"}],
            "locations": [{"id": "early"}],
        });

        let list = find_list(&body, STATION_CONTAINER_KEYS).unwrap();
        assert_eq!(list[0]["id"], "early");
    }

    #[test]
    fn non_array_container_values_are_skipped() {
        let body = json!({
            "locations": "not a list",
            "stopLocations": [{"id": "1"}],
        });

        let list = find_list(&body, STATION_CONTAINER_KEYS).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn unknown_shape_is_none() {
        assert!(find_list(&json!({"results": []}), STATION_CONTAINER_KEYS).is_none());
        assert!(find_list(&json!(42), STATION_CONTAINER_KEYS).is_none());
    }

    #[test]
    fn departures_container_keys() {
        let body = json!({"departures": [{"line": {"name": "S1"}}]});
        assert!(find_list(&body, DEPARTURE_CONTAINER_KEYS).is_some());

        let body = json!({"journeys": []});
        assert!(find_list(&body, DEPARTURE_CONTAINER_KEYS).is_some());
    }

    #[test]
    fn station_filter() {
        assert!(looks_like_station(&json!({"type": "stop", "name": "X"})));
        assert!(looks_like_station(&json!({"id": "900", "name": "X"})));
        assert!(!looks_like_station(&json!({"type": "poi", "name": "X"})));
        assert!(!looks_like_station(&json!("just a string")));
    }

    #[test]
    fn reduce_station_variants() {
        let full = reduce_station(&json!({"id": "900000100001", "name": "Potsdam Hbf"}));
        assert_eq!(full.id.as_deref(), Some("900000100001"));
        assert_eq!(full.name, "Potsdam Hbf");

        let numeric = reduce_station(&json!({"id": 900000100001u64, "name": "Potsdam Hbf"}));
        assert_eq!(numeric.id.as_deref(), Some("900000100001"));

        let nameless = reduce_station(&json!({"id": "1"}));
        assert_eq!(nameless.name, "Unknown Name");

        let idless = reduce_station(&json!({"type": "stop", "name": "Somewhere"}));
        assert_eq!(idless.id, None);
        assert!(!idless.selectable());
    }
}
