//! Shared in-memory fakes for the collaborator traits.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use promptgate::{
    BridgeConfig, InferenceConfig, JsonEventStream, ModelRuntime, PromptBridge, PromptCatalog,
    PromptDefinition, PromptError, PromptPage, PromptSummary, PromptVariant,
};

/// Catalog fake backed by a fixed id-to-definition map.
#[derive(Default)]
pub struct MockCatalog {
    prompts: HashMap<String, PromptDefinition>,
    page: PromptPage,
}

impl MockCatalog {
    pub fn with_prompt(mut self, definition: PromptDefinition) -> Self {
        self.prompts.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_page(mut self, items: Vec<PromptSummary>, next_token: Option<&str>) -> Self {
        self.page = PromptPage {
            items,
            next_token: next_token.map(str::to_string),
        };
        self
    }
}

#[async_trait]
impl PromptCatalog for MockCatalog {
    async fn get_prompt(
        &self,
        prompt_id: &str,
        _version: Option<&str>,
    ) -> Result<PromptDefinition, PromptError> {
        self.prompts
            .get(prompt_id)
            .cloned()
            .ok_or_else(|| PromptError::NotFound(format!("prompt {prompt_id} not found")))
    }

    async fn list_prompts(
        &self,
        _max_results: u32,
        _next_token: Option<&str>,
    ) -> Result<PromptPage, PromptError> {
        Ok(self.page.clone())
    }

    async fn list_prompt_versions(
        &self,
        prompt_id: &str,
        _max_results: u32,
    ) -> Result<PromptPage, PromptError> {
        if !self.prompts.contains_key(prompt_id) {
            return Err(PromptError::NotFound(format!("prompt {prompt_id} not found")));
        }
        Ok(self.page.clone())
    }
}

/// Runtime fake returning one canned response body.
///
/// A failure marker makes any request whose serialized body contains the
/// marker fail, which keeps failure injection deterministic under
/// concurrent batch execution.
#[derive(Default)]
pub struct MockRuntime {
    response: Value,
    fail_markers: Vec<String>,
    delay: Option<Duration>,
    stream_events: Vec<Value>,
    stream_trailing_error: bool,
}

impl MockRuntime {
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_markers.push(marker.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_stream_events(mut self, events: Vec<Value>) -> Self {
        self.stream_events = events;
        self
    }

    pub fn with_stream_trailing_error(mut self) -> Self {
        self.stream_trailing_error = true;
        self
    }
}

#[async_trait]
impl ModelRuntime for MockRuntime {
    async fn invoke(&self, _model_id: &str, body: &Value) -> Result<Value, PromptError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let serialized = body.to_string();
        if self.fail_markers.iter().any(|m| serialized.contains(m)) {
            return Err(PromptError::ApiError {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(self.response.clone())
    }

    async fn invoke_stream(
        &self,
        _model_id: &str,
        _body: &Value,
    ) -> Result<JsonEventStream, PromptError> {
        let items: Vec<Result<Value, PromptError>> = self
            .stream_events
            .iter()
            .cloned()
            .map(Ok)
            .chain(self.stream_trailing_error.then(|| {
                Err(PromptError::StreamError("connection reset".to_string()))
            }))
            .collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

pub fn bridge(catalog: MockCatalog, runtime: MockRuntime) -> PromptBridge {
    bridge_with_config(catalog, runtime, BridgeConfig::default())
}

pub fn bridge_with_config(
    catalog: MockCatalog,
    runtime: MockRuntime,
    config: BridgeConfig,
) -> PromptBridge {
    PromptBridge::new(Arc::new(catalog), Arc::new(runtime), config)
}

pub fn definition(id: &str, model_id: &str, template: &str) -> PromptDefinition {
    PromptDefinition {
        id: id.to_string(),
        name: Some(format!("{id}-name")),
        version: Some("1".to_string()),
        default_variant: Some("variantOne".to_string()),
        variants: vec![PromptVariant {
            name: "variantOne".to_string(),
            model_id: model_id.to_string(),
            template_text: template.to_string(),
            input_variables: Vec::new(),
            inference: InferenceConfig::default(),
            additional_fields: serde_json::Map::new(),
        }],
    }
}

pub fn claude_definition(id: &str, template: &str) -> PromptDefinition {
    definition(id, "anthropic.claude-3-haiku-20240307-v1:0", template)
}

pub fn claude_response(text: &str) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}
