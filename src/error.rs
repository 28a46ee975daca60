//! Error handling for promptgate.
//!
//! A single error enum covers every failure the crate can produce. Public
//! operations never let an error escape the tool boundary: `ops::dispatch`
//! converts any variant into the uniform `{"success": false, "error": ...}`
//! envelope.

use std::time::Duration;
use thiserror::Error;

/// All errors produced by prompt resolution, invocation and transport.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Network-level failure before a usable response was produced.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The backing service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Unknown prompt id or version.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// The prompt definition carries no variants at all.
    #[error("No variant found in prompt '{0}'")]
    NoVariantFound(String),

    /// The selected variant has no template text.
    #[error("No template text found in prompt '{0}'")]
    MissingTemplate(String),

    /// A batch task exceeded its wall-clock budget.
    #[error("Invocation timed out after {0:?}")]
    Timeout(Duration),

    /// Failure while consuming a streaming response.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// Invalid client configuration (endpoints, credentials, timeouts).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A caller-supplied argument was missing or of the wrong shape.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested mode is not available on this operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Catch-all for failures that fit no other variant.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for PromptError {
    fn from(err: reqwest::Error) -> Self {
        PromptError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        PromptError::ParseError(err.to_string())
    }
}
