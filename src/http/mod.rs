//! Reqwest-backed implementations of the collaborator traits.
//!
//! Auth is kept lightweight: a bearer token when configured, nothing
//! otherwise. Deployments that require SigV4 signing sit behind a signing
//! proxy or inject signed headers at the reqwest layer.

mod catalog;
mod runtime;

pub use catalog::HttpPromptCatalog;
pub use runtime::HttpModelRuntime;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};

use crate::config::BridgeConfig;
use crate::error::PromptError;

pub(crate) fn build_client(config: &BridgeConfig) -> Result<reqwest::Client, PromptError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .default_headers(default_headers(config.api_key.as_ref())?)
        .build()
        .map_err(|e| PromptError::ConfigurationError(format!("failed to build HTTP client: {e}")))
}

fn default_headers(api_key: Option<&SecretString>) -> Result<HeaderMap, PromptError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {}", key.expose_secret()))
            .map_err(|e| PromptError::ConfigurationError(format!("invalid bearer token: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Map a non-success response into the error taxonomy, consuming the body
/// for the message.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, PromptError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(PromptError::NotFound(message));
    }
    Err(PromptError::ApiError {
        status: status.as_u16(),
        message,
    })
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
