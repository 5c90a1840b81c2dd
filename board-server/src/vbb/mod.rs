//! VBB transit-data API boundary.
//!
//! This module owns everything that touches the upstream API: the HTTP
//! client, the defensive response probing, the error taxonomy, and the
//! demo fixtures used when no API key is configured.
//!
//! Key characteristics of the upstream:
//! - The response shape is only loosely specified; payload lists may sit
//!   at the top level or under one of several conventional keys.
//! - Departure records are schema-ambiguous; see [`crate::normalize`].
//! - Authentication is a static bearer key; requests time out after 10s.

mod client;
mod error;
mod mock;
mod probe;

pub use client::{
    DEFAULT_WINDOW_MINUTES, DEPARTURE_RESULT_LIMIT, SEARCH_RESULT_LIMIT, VbbClient, VbbConfig,
};
pub use error::VbbError;
pub use mock::{demo_departures, demo_stations};
pub use probe::{
    DEPARTURE_CONTAINER_KEYS, STATION_CONTAINER_KEYS, find_list, looks_like_station,
    reduce_station,
};

use crate::domain::StationCandidate;
use crate::normalize::RawDeparture;

/// Data source backing the dashboard: the live API or the demo fixtures.
///
/// The Interaction Shell is agnostic of the backing mode; demo mode only
/// differs in serving fixtures and never touching the network.
pub enum VbbSource {
    /// Live API client.
    Live(VbbClient),

    /// Fixture data, for structural testing without an API key.
    Demo,
}

impl VbbSource {
    /// Whether this source serves fixture data.
    pub fn is_demo(&self) -> bool {
        matches!(self, VbbSource::Demo)
    }

    /// Station lookup; see [`VbbClient::search_stations`].
    pub async fn search_stations(&self, query: &str) -> Result<Vec<StationCandidate>, VbbError> {
        match self {
            VbbSource::Live(client) => client.search_stations(query).await,
            VbbSource::Demo => Ok(demo_stations()),
        }
    }

    /// Departure fetch; see [`VbbClient::departures`].
    pub async fn departures(
        &self,
        stop_id: &str,
        window_minutes: u32,
    ) -> Result<Vec<RawDeparture>, VbbError> {
        match self {
            VbbSource::Live(client) => client.departures(stop_id, window_minutes).await,
            VbbSource::Demo => Ok(demo_departures()),
        }
    }
}
