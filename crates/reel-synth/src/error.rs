//! Error types for synthesis clients.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors from the avatar and voice services.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("{service} API returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} response missing {field}")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Media(#[from] reel_media::MediaError),
}

impl SynthError {
    /// Create an API error from a non-success response.
    pub fn api(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            service,
            status,
            message: message.into(),
        }
    }

    /// Create an error for a well-formed response missing a field.
    pub fn missing_field(service: &'static str, field: &'static str) -> Self {
        Self::MissingField { service, field }
    }
}
