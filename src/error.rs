//! Error types for Wistia API operations.

use thiserror::Error;

/// Errors that can occur during Wistia API operations.
#[derive(Debug, Error)]
pub enum WistiaError {
    /// Configuration is missing or incomplete.
    #[error("Wistia configuration required: {0}")]
    ConfigMissing(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The API answered with a non-success status.
    #[error("Wistia API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error (DNS, connection, timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body was empty or not valid JSON.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response was valid JSON but not the shape the operation needs.
    #[error("Unexpected response shape: expected {expected}")]
    UnexpectedShape { expected: &'static str },

    /// The entity has no upstream identifier yet.
    #[error("cannot {operation} {entity_type}: it has not been saved to Wistia")]
    NotPersisted {
        entity_type: &'static str,
        operation: &'static str,
    },

    /// A date could not be normalized to a calendar day.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl WistiaError {
    /// The HTTP status code, when the error came from an API response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            WistiaError::ApiError { status_code, .. } => *status_code,
            WistiaError::NotFound { .. } => Some(404),
            WistiaError::RateLimited { .. } => Some(429),
            WistiaError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Turn a 404 API error into [`WistiaError::NotFound`] for the given entity.
    pub(crate) fn into_not_found(self, entity_type: &'static str, id: &str) -> Self {
        match self {
            WistiaError::ApiError {
                status_code: Some(404),
                ..
            } => WistiaError::NotFound {
                entity_type,
                id: id.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for Wistia operations.
pub type Result<T> = core::result::Result<T, WistiaError>;
