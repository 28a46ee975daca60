//! Single-call and streaming invocation.
//!
//! Both paths share one resolution pipeline: fetch the definition, select
//! the variant (declared default, else first), render the template, classify
//! the model id, build the family-specific request. They differ only in how
//! the runtime call is made and decoded.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::Value;

use crate::adapters;
use crate::config::BridgeConfig;
use crate::error::PromptError;
use crate::family::ModelFamily;
use crate::http::{HttpModelRuntime, HttpPromptCatalog};
use crate::streaming::{decode_event, ChunkAccumulator};
use crate::template;
use crate::transport::{ModelRuntime, PromptCatalog};
use crate::types::{Invocation, PromptDefinition, StreamingInvocation, VariableMap};

/// Orchestrates prompt resolution and model invocation against the two
/// external collaborators. Cheap to clone; clones share the collaborators.
#[derive(Clone)]
pub struct PromptBridge {
    pub(crate) catalog: Arc<dyn PromptCatalog>,
    pub(crate) runtime: Arc<dyn ModelRuntime>,
    pub(crate) config: BridgeConfig,
}

/// Everything needed for one runtime call, derived from a variant.
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub model_id: String,
    pub family: ModelFamily,
    pub filled_template: String,
    pub body: Value,
}

impl PromptBridge {
    pub fn new(
        catalog: Arc<dyn PromptCatalog>,
        runtime: Arc<dyn ModelRuntime>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            catalog,
            runtime,
            config,
        }
    }

    /// Wire up the HTTP collaborators from configuration.
    pub fn from_config(config: BridgeConfig) -> Result<Self, PromptError> {
        let catalog = Arc::new(HttpPromptCatalog::new(&config)?);
        let runtime = Arc::new(HttpModelRuntime::new(&config)?);
        Ok(Self::new(catalog, runtime, config))
    }

    /// Resolve, render and build without performing the runtime call.
    pub(crate) fn prepare(
        prompt_id: &str,
        definition: &PromptDefinition,
        variables: &VariableMap,
    ) -> Result<PreparedRequest, PromptError> {
        let variant = definition
            .select_variant()
            .ok_or_else(|| PromptError::NoVariantFound(prompt_id.to_string()))?;

        if variant.template_text.is_empty() {
            return Err(PromptError::MissingTemplate(prompt_id.to_string()));
        }

        let filled_template = template::render(&variant.template_text, variables);
        let family = ModelFamily::classify(&variant.model_id);
        let body = adapters::build_request(
            family,
            &filled_template,
            &variant.inference,
            &variant.additional_fields,
        );

        tracing::debug!(
            prompt_id,
            model_id = %variant.model_id,
            %family,
            variant = %variant.name,
            "prepared invocation request"
        );

        Ok(PreparedRequest {
            model_id: variant.model_id.clone(),
            family,
            filled_template,
            body,
        })
    }

    /// Invoke a prompt once and parse the completion.
    pub async fn invoke(
        &self,
        prompt_id: &str,
        variables: &VariableMap,
        version: Option<&str>,
    ) -> Result<Invocation, PromptError> {
        let definition = self.catalog.get_prompt(prompt_id, version).await?;
        self.invoke_resolved(prompt_id, &definition, variables).await
    }

    /// Invocation against an already-fetched definition; the batch
    /// orchestrator shares one definition across all its tasks.
    pub(crate) async fn invoke_resolved(
        &self,
        prompt_id: &str,
        definition: &PromptDefinition,
        variables: &VariableMap,
    ) -> Result<Invocation, PromptError> {
        let prepared = Self::prepare(prompt_id, definition, variables)?;
        let raw = self.runtime.invoke(&prepared.model_id, &prepared.body).await?;
        let completion = adapters::parse_response(prepared.family, &raw);

        Ok(Invocation {
            prompt_id: prompt_id.to_string(),
            model_id: prepared.model_id,
            model_family: prepared.family,
            filled_template: prepared.filled_template,
            completion,
            raw_response: raw,
        })
    }

    /// Invoke a prompt with a streaming response, accumulating decoded
    /// chunks in arrival order.
    pub async fn invoke_streaming(
        &self,
        prompt_id: &str,
        variables: &VariableMap,
        version: Option<&str>,
    ) -> Result<StreamingInvocation, PromptError> {
        let definition = self.catalog.get_prompt(prompt_id, version).await?;
        let prepared = Self::prepare(prompt_id, &definition, variables)?;

        let mut events = self
            .runtime
            .invoke_stream(&prepared.model_id, &prepared.body)
            .await?;

        let mut acc = ChunkAccumulator::default();
        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    if let Some(text) = decode_event(prepared.family, &event) {
                        acc.push(text);
                    }
                }
                Err(e) => {
                    // A broken transport mid-stream with nothing decoded is a
                    // hard failure; after the first chunk, partial output wins.
                    if acc.is_empty() {
                        return Err(e);
                    }
                    tracing::warn!("stream ended early, keeping partial output: {e}");
                    break;
                }
            }
        }

        let (completion, chunks) = acc.into_parts();
        Ok(StreamingInvocation {
            prompt_id: prompt_id.to_string(),
            model_id: prepared.model_id,
            model_family: prepared.family,
            filled_template: prepared.filled_template,
            completion,
            chunks,
        })
    }
}
