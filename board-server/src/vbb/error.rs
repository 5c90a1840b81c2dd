//! VBB client error types.

/// Errors from the VBB HTTP client.
///
/// Every variant is caught at the Interaction Shell boundary and degraded
/// to an empty result plus a user-visible warning; none propagates further.
#[derive(Debug, thiserror::Error)]
pub enum VbbError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check VBB_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("JSON decode error: {message}")]
    Decode { message: String },

    /// No list found under any known container key. Distinct from an
    /// empty list, which is a successful response with no results.
    #[error("could not find {kind} list in API response")]
    ListNotFound { kind: &'static str },
}
