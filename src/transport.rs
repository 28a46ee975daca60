//! Collaborator seams: the prompt catalog and the model runtime.
//!
//! Both services are external; this crate only specifies their interface and
//! ships reqwest-backed implementations in [`crate::http`]. Tests inject
//! in-memory fakes through the same traits.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;

use crate::error::PromptError;
use crate::types::{PromptDefinition, PromptPage};

/// Ordered sequence of provider-native streaming event objects.
pub type JsonEventStream = Pin<Box<dyn Stream<Item = Result<Value, PromptError>> + Send>>;

/// Read-only access to the managed prompt catalog.
#[async_trait]
pub trait PromptCatalog: Send + Sync {
    /// Fetch one prompt definition, optionally pinned to a version.
    async fn get_prompt(
        &self,
        prompt_id: &str,
        version: Option<&str>,
    ) -> Result<PromptDefinition, PromptError>;

    /// Page through prompt summaries.
    async fn list_prompts(
        &self,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<PromptPage, PromptError>;

    /// Page through the version history of one prompt.
    async fn list_prompt_versions(
        &self,
        prompt_id: &str,
        max_results: u32,
    ) -> Result<PromptPage, PromptError>;
}

/// The inference endpoint hosting all model families.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// One blocking invocation; returns the parsed response body.
    async fn invoke(&self, model_id: &str, body: &Value) -> Result<Value, PromptError>;

    /// Streaming invocation; yields provider-native event objects in
    /// arrival order.
    async fn invoke_stream(
        &self,
        model_id: &str,
        body: &Value,
    ) -> Result<JsonEventStream, PromptError>;
}
