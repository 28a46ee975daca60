//! Prompt catalog over the bedrock-agent REST surface.
//!
//! The wire shape nests template and inference settings per content type
//! (`templateConfiguration.text.text`, `inferenceConfiguration.text`); this
//! module flattens it into the crate's domain types at the boundary.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::error::PromptError;
use crate::transport::PromptCatalog;
use crate::types::{InferenceConfig, PromptDefinition, PromptPage, PromptSummary, PromptVariant};

use super::{build_client, check_status, join_url};

pub struct HttpPromptCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPromptCatalog {
    pub fn new(config: &BridgeConfig) -> Result<Self, PromptError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.catalog_base_url.clone(),
        })
    }

    fn prompt_url(&self, prompt_id: &str) -> String {
        join_url(
            &self.base_url,
            &format!("prompts/{}", urlencoding::encode(prompt_id)),
        )
    }
}

#[async_trait]
impl PromptCatalog for HttpPromptCatalog {
    async fn get_prompt(
        &self,
        prompt_id: &str,
        version: Option<&str>,
    ) -> Result<PromptDefinition, PromptError> {
        tracing::debug!(prompt_id, ?version, "fetching prompt definition");
        let mut request = self.client.get(self.prompt_url(prompt_id));
        if let Some(version) = version {
            request = request.query(&[("promptVersion", version)]);
        }
        let response = check_status(request.send().await?).await?;
        let wire: WirePrompt = response
            .json()
            .await
            .map_err(|e| PromptError::ParseError(format!("prompt definition: {e}")))?;
        Ok(wire.into_definition(prompt_id))
    }

    async fn list_prompts(
        &self,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<PromptPage, PromptError> {
        let mut request = self
            .client
            .get(join_url(&self.base_url, "prompts"))
            .query(&[("maxResults", max_results.to_string())]);
        if let Some(token) = next_token {
            request = request.query(&[("nextToken", token)]);
        }
        let response = check_status(request.send().await?).await?;
        let wire: WirePromptListing = response
            .json()
            .await
            .map_err(|e| PromptError::ParseError(format!("prompt listing: {e}")))?;
        Ok(wire.into_page())
    }

    async fn list_prompt_versions(
        &self,
        prompt_id: &str,
        max_results: u32,
    ) -> Result<PromptPage, PromptError> {
        let request = self
            .client
            .get(format!("{}/versions", self.prompt_url(prompt_id)))
            .query(&[("maxResults", max_results.to_string())]);
        let response = check_status(request.send().await?).await?;
        let wire: WirePromptListing = response
            .json()
            .await
            .map_err(|e| PromptError::ParseError(format!("prompt versions: {e}")))?;
        Ok(wire.into_page())
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptListing {
    #[serde(default)]
    prompt_summaries: Vec<PromptSummary>,
    #[serde(default)]
    next_token: Option<String>,
}

impl WirePromptListing {
    fn into_page(self) -> PromptPage {
        PromptPage {
            items: self.prompt_summaries,
            next_token: self.next_token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePrompt {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    default_variant: Option<String>,
    #[serde(default)]
    variants: Vec<WireVariant>,
}

impl WirePrompt {
    fn into_definition(self, requested_id: &str) -> PromptDefinition {
        PromptDefinition {
            id: self.id.unwrap_or_else(|| requested_id.to_string()),
            name: self.name,
            version: self.version,
            default_variant: self.default_variant,
            variants: self.variants.into_iter().map(WireVariant::into_variant).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariant {
    #[serde(default)]
    name: String,
    #[serde(default)]
    model_id: String,
    #[serde(default)]
    template_configuration: Option<WireTemplateConfiguration>,
    #[serde(default)]
    inference_configuration: Option<WireInferenceConfiguration>,
    #[serde(default)]
    additional_model_request_fields: Option<Value>,
}

impl WireVariant {
    fn into_variant(self) -> PromptVariant {
        let (template_text, input_variables) = self
            .template_configuration
            .and_then(|tc| tc.text)
            .map(|text| {
                let names = text.input_variables.into_iter().map(|v| v.name).collect();
                (text.text, names)
            })
            .unwrap_or_default();

        let inference = self
            .inference_configuration
            .and_then(|ic| ic.text)
            .unwrap_or_default();

        let additional_fields = match self.additional_model_request_fields {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };

        PromptVariant {
            name: self.name,
            model_id: self.model_id,
            template_text,
            input_variables,
            inference,
            additional_fields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireTemplateConfiguration {
    #[serde(default)]
    text: Option<WireTextTemplate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTextTemplate {
    #[serde(default)]
    text: String,
    #[serde(default)]
    input_variables: Vec<WireInputVariable>,
}

#[derive(Debug, Deserialize)]
struct WireInputVariable {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireInferenceConfiguration {
    #[serde(default)]
    text: Option<InferenceConfig>,
}
