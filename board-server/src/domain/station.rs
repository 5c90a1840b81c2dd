//! Station types.

use serde::Serialize;

/// A station search hit, reduced to identifier and display name.
///
/// The upstream search may return entries that look like a station (an
/// explicit `type == "stop"` marker) without carrying an id. Such entries
/// are kept as candidates but cannot be selected; the shell filters them
/// out before offering selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCandidate {
    /// Stop identifier used for departure queries, if present.
    pub id: Option<String>,

    /// Human-readable station name.
    pub name: String,
}

impl StationCandidate {
    /// Whether this candidate can actually be selected for a board.
    pub fn selectable(&self) -> bool {
        self.id.is_some()
    }
}

/// The station currently shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedStation {
    /// Stop identifier.
    pub id: String,

    /// Human-readable station name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectable_requires_id() {
        let with_id = StationCandidate {
            id: Some("900000100001".into()),
            name: "Potsdam Hbf".into(),
        };
        let without_id = StationCandidate {
            id: None,
            name: "Somewhere".into(),
        };

        assert!(with_id.selectable());
        assert!(!without_id.selectable());
    }
}
