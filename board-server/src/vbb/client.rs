//! VBB transit-data HTTP client.
//!
//! Two GET calls against a VBB-style endpoint: station lookup and
//! departures for a stop. Both use bearer-token authentication, a fixed
//! request timeout, and the defensive container probing from
//! [`super::probe`], because the upstream response shape is only loosely
//! specified.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::domain::StationCandidate;
use crate::normalize::RawDeparture;

use super::error::VbbError;
use super::probe::{
    DEPARTURE_CONTAINER_KEYS, STATION_CONTAINER_KEYS, find_list, looks_like_station,
    reduce_station,
};

/// Default base URL for the VBB API.
const DEFAULT_BASE_URL: &str = "https://vbb-api-endpoint.example.com/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Stations requested from the API and kept per search.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Departure cap per fetch, applied server-side via the request parameter.
pub const DEPARTURE_RESULT_LIMIT: u32 = 20;

/// Default look-ahead window for departures, in minutes.
pub const DEFAULT_WINDOW_MINUTES: u32 = 60;

/// Configuration for the VBB client.
#[derive(Debug, Clone)]
pub struct VbbConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VbbConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the VBB transit-data API.
#[derive(Debug, Clone)]
pub struct VbbClient {
    http: reqwest::Client,
    base_url: String,
}

impl VbbClient {
    /// Create a new VBB client with the given configuration.
    pub fn new(config: VbbConfig) -> Result<Self, VbbError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            VbbError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Search for stations matching a free-text query.
    ///
    /// Returns at most [`SEARCH_RESULT_LIMIT`] candidates reduced to
    /// `{id, name}`, in source order. Non-station hits are filtered out.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<StationCandidate>, VbbError> {
        let url = format!("{}/locations", self.base_url);
        let results = SEARCH_RESULT_LIMIT.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[("query", query), ("results", results.as_str())])
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let body: Value = serde_json::from_str(&body).map_err(|e| VbbError::Decode {
            message: e.to_string(),
        })?;

        let list = find_list(&body, STATION_CONTAINER_KEYS)
            .ok_or(VbbError::ListNotFound { kind: "station" })?;

        Ok(list
            .iter()
            .filter(|entry| looks_like_station(entry))
            .take(SEARCH_RESULT_LIMIT)
            .map(reduce_station)
            .collect())
    }

    /// Fetch raw departures for a stop within a look-ahead window.
    ///
    /// The result cap ([`DEPARTURE_RESULT_LIMIT`]) is applied server-side
    /// via the request parameters. The list comes back unfiltered and
    /// unsorted, in source order; normalization is the caller's business.
    pub async fn departures(
        &self,
        stop_id: &str,
        window_minutes: u32,
    ) -> Result<Vec<RawDeparture>, VbbError> {
        let url = format!("{}/stops/{}/departures", self.base_url, stop_id);
        let duration = window_minutes.to_string();
        let results = DEPARTURE_RESULT_LIMIT.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[("duration", duration.as_str()), ("results", results.as_str())])
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let body: Value = serde_json::from_str(&body).map_err(|e| VbbError::Decode {
            message: e.to_string(),
        })?;

        let list = find_list(&body, DEPARTURE_CONTAINER_KEYS)
            .ok_or(VbbError::ListNotFound { kind: "departure" })?;

        Ok(list.to_vec())
    }
}

/// Map the HTTP status to the error taxonomy and return the body text.
async fn read_success_body(response: reqwest::Response) -> Result<String, VbbError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(VbbError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(VbbError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = VbbConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builder() {
        let config = VbbConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = VbbClient::new(VbbConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_unusable_key() {
        // Header values cannot contain newlines.
        let client = VbbClient::new(VbbConfig::new("bad\nkey"));
        assert!(client.is_err());
    }

    // Integration tests would require a real API key and live requests;
    // the response-shape handling is covered in `probe` and `normalize`.
}
