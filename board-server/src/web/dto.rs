//! Data transfer objects for web requests and the JSON board view.

use serde::{Deserialize, Serialize};

use crate::domain::{DisplayRecord, SelectedStation};
use crate::normalize::LineDelay;

/// Query parameters for the station search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text station query
    pub q: Option<String>,
}

/// Query parameters for selecting a station.
#[derive(Debug, Deserialize)]
pub struct SelectParams {
    /// Stop identifier from the candidate list
    pub id: String,
}

/// JSON view of the current board, ready for direct display.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Currently selected station, if any
    pub station: Option<SelectedStation>,

    /// Canonical departure table, sorted by expected time
    pub records: Vec<DisplayRecord>,

    /// Top per-line mean delays, descending
    pub average_delay_by_line: Vec<LineDelay>,

    /// Raw records dropped during normalization
    pub skipped_records: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
