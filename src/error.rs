// Error types for the hauskit client library.
// Covers REST API errors, blob cache storage errors, and configuration errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HauskitError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Missing HAUSKIT_API_URL environment variable")]
    MissingBaseUrl,

    #[error("No floor {floor} in house {house}")]
    FloorNotFound { house: String, floor: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HauskitError>;
