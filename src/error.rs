//! Error types for the Haven SDK.
//!
//! Everything that can go wrong originates at the request boundary: the
//! platform rejected the call, the HTTP layer failed, or the response body
//! did not decode. Model types never translate these; they propagate
//! unchanged so callers can match on the platform's own taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HavenError {
    /// The HTTP response had a non-2xx status code.
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        /// Machine-readable platform error code (e.g. `NOT_FOUND`), when
        /// the error body carried one.
        code: Option<String>,
        message: String,
    },

    /// The platform asked us to slow down (HTTP 429).
    #[error("Rate limited. Retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// An error from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generic error string.
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HavenError>;
