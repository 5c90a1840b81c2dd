//! Application and session state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{DisplayRecord, SelectedStation, StationCandidate};
use crate::normalize::LineDelay;
use crate::vbb::VbbSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Data source (live API or demo fixtures)
    pub vbb: Arc<VbbSource>,

    /// Process-wide UI session
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create a new app state with an empty session.
    pub fn new(vbb: VbbSource) -> Self {
        Self {
            vbb: Arc::new(vbb),
            session: Arc::new(RwLock::new(Session::default())),
        }
    }
}

/// Normalized board cached for the current selection.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Canonical records, sorted by expected time.
    pub records: Vec<DisplayRecord>,

    /// Per-line mean delays for the chart.
    pub delay_chart: Vec<LineDelay>,

    /// Number of raw records dropped during normalization.
    pub skipped: usize,
}

/// Process-wide UI session: search query, candidate list, selection, and
/// the cached board.
///
/// The cache-invalidation rule is explicit and lives entirely in this
/// type: a query change invalidates candidates, selection, and board; a
/// selection change invalidates the board; [`Session::invalidate_board`]
/// (explicit refresh) invalidates the board. Nothing else does.
#[derive(Debug, Default)]
pub struct Session {
    query: String,
    candidates: Vec<StationCandidate>,
    selected: Option<SelectedStation>,
    board: Option<BoardSnapshot>,
}

impl Session {
    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current search candidates.
    pub fn candidates(&self) -> &[StationCandidate] {
        &self.candidates
    }

    /// Currently selected station, if any.
    pub fn selected(&self) -> Option<&SelectedStation> {
        self.selected.as_ref()
    }

    /// Cached board for the current selection, if loaded.
    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    /// Update the search query. A changed query clears candidates,
    /// selection, and the cached board; an unchanged one clears nothing.
    pub fn set_query(&mut self, query: &str) {
        if query == self.query {
            return;
        }
        self.query = query.to_string();
        self.candidates.clear();
        self.selected = None;
        self.board = None;
    }

    /// Replace the candidate list after a search.
    pub fn set_candidates(&mut self, candidates: Vec<StationCandidate>) {
        self.candidates = candidates;
    }

    /// Select a candidate by id. A selection change invalidates the
    /// cached board; re-selecting the current station keeps it.
    ///
    /// Returns the selected station, or `None` if no candidate carries
    /// the id.
    pub fn select(&mut self, id: &str) -> Option<SelectedStation> {
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.id.as_deref() == Some(id))?;

        let station = SelectedStation {
            id: id.to_string(),
            name: candidate.name.clone(),
        };

        if self.selected.as_ref() != Some(&station) {
            self.selected = Some(station.clone());
            self.board = None;
        }

        Some(station)
    }

    /// First candidate that can actually be selected, if any.
    pub fn first_selectable(&self) -> Option<&StationCandidate> {
        self.candidates.iter().find(|c| c.selectable())
    }

    /// Drop the cached board (explicit refresh).
    pub fn invalidate_board(&mut self) {
        self.board = None;
    }

    /// Cache a freshly normalized board.
    pub fn store_board(&mut self, board: BoardSnapshot) {
        self.board = Some(board);
    }
}
