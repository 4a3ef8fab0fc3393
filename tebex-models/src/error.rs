//! Error types for typed model conversion and API calls

use thiserror::Error;

/// Errors raised when bridging codec output to typed models.
///
/// The codec itself never fails; these only come from the serde step.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The typed model is not registered in the registry it was used with
    #[error("Type not registered: {0}")]
    UnregisteredType(&'static str),

    /// serde could not map between the domain value and the typed model
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

/// Errors raised by the API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API answered with a non-success status
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// Typed conversion failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for typed model conversion
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Result type for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;
