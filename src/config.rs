//! Bridge configuration.
//!
//! Endpoints default to the regional Bedrock hosts; everything can be
//! overridden for testing against local servers. The bearer key is held in a
//! [`SecretString`] so it never shows up in debug output.

use std::time::Duration;

use secrecy::SecretString;

/// Environment variable naming follows the original deployment contract.
const ENV_REGION: &str = "AWS_REGION";
const ENV_BEARER_TOKEN: &str = "AWS_BEARER_TOKEN_BEDROCK";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Per-task wall clock budget for batch workers.
const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for a [`crate::PromptBridge`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub region: String,
    /// Base URL of the prompt catalog service (bedrock-agent).
    pub catalog_base_url: String,
    /// Base URL of the inference endpoint (bedrock-runtime).
    pub runtime_base_url: String,
    /// Bearer token for API-key auth. SigV4-signed deployments inject their
    /// own headers instead and leave this unset.
    pub api_key: Option<SecretString>,
    /// HTTP timeout for single catalog/runtime requests.
    pub request_timeout: Duration,
    /// Wall-clock budget applied to each batch task.
    pub task_timeout: Duration,
}

impl BridgeConfig {
    pub fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            catalog_base_url: format!("https://bedrock-agent.{region}.amazonaws.com"),
            runtime_base_url: format!("https://bedrock-runtime.{region}.amazonaws.com"),
            region,
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    /// Build from the process environment: `AWS_REGION` (default us-east-1)
    /// and `AWS_BEARER_TOKEN_BEDROCK` when present.
    pub fn from_env() -> Self {
        let region = std::env::var(ENV_REGION).unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let mut config = Self::new(region);
        if let Ok(token) = std::env::var(ENV_BEARER_TOKEN) {
            if !token.trim().is_empty() {
                config.api_key = Some(SecretString::from(token));
            }
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_catalog_base_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_base_url = url.into();
        self
    }

    pub fn with_runtime_base_url(mut self, url: impl Into<String>) -> Self {
        self.runtime_base_url = url.into();
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}
