//! Core data types shared across the crate.
//!
//! Catalog resources (`PromptDefinition`, `PromptVariant`) are fetched
//! read-only per invocation and never mutated here. Invocation results are
//! immutable once constructed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::family::ModelFamily;

/// Variable mapping supplied by the caller for one invocation.
///
/// `BTreeMap` keeps substitution order deterministic (sorted by name).
pub type VariableMap = BTreeMap<String, String>;

/// One entry of a prompt listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One page of prompt summaries plus the pagination cursor.
#[derive(Debug, Clone, Default)]
pub struct PromptPage {
    pub items: Vec<PromptSummary>,
    pub next_token: Option<String>,
}

/// Provider-agnostic inference parameters attached to a variant.
///
/// Token counts are carried as raw numbers and coerced to integers by the
/// request builders; temperature and nucleus-sampling probability stay
/// floating point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl InferenceConfig {
    pub(crate) const DEFAULT_MAX_TOKENS: u64 = 2000;
    pub(crate) const DEFAULT_TEMPERATURE: f64 = 1.0;
    pub(crate) const DEFAULT_TOP_P: f64 = 0.999;

    /// Token budget coerced to an integer, with the catalog default.
    pub fn max_tokens_or_default(&self) -> u64 {
        self.max_tokens
            .map(|v| v as u64)
            .unwrap_or(Self::DEFAULT_MAX_TOKENS)
    }

    pub fn temperature_or_default(&self) -> f64 {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    pub fn top_p_or_default(&self) -> f64 {
        self.top_p.unwrap_or(Self::DEFAULT_TOP_P)
    }
}

/// One concrete configuration inside a prompt definition.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVariant {
    pub name: String,
    pub model_id: String,
    pub template_text: String,
    /// Declared input variable names; informational only, rendering accepts
    /// any mapping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_variables: Vec<String>,
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Provider-specific extra request parameters, passed through opaquely.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub additional_fields: serde_json::Map<String, serde_json::Value>,
}

/// A named, versioned prompt resource from the catalog.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant: Option<String>,
    pub variants: Vec<PromptVariant>,
}

impl PromptDefinition {
    /// Select the variant named by `default_variant`, falling back to the
    /// first variant in sequence when the declared name matches none.
    /// Returns `None` only when the variant list is empty.
    pub fn select_variant(&self) -> Option<&PromptVariant> {
        if let Some(name) = self.default_variant.as_deref() {
            if let Some(v) = self.variants.iter().find(|v| v.name == name) {
                return Some(v);
            }
        }
        self.variants.first()
    }
}

/// Result of a single non-streaming invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub prompt_id: String,
    pub model_id: String,
    pub model_family: ModelFamily,
    /// The template as actually sent, after variable substitution.
    pub filled_template: String,
    pub completion: String,
    /// Raw parsed response body, kept for caller introspection.
    pub raw_response: serde_json::Value,
}

/// Result of a streaming invocation: the accumulated completion plus the
/// ordered chunk list. Concatenating `chunks` yields `completion`.
#[derive(Debug, Clone)]
pub struct StreamingInvocation {
    pub prompt_id: String,
    pub model_id: String,
    pub model_family: ModelFamily,
    pub filled_template: String,
    pub completion: String,
    pub chunks: Vec<String>,
}

/// One completed batch task.
#[derive(Debug, Clone)]
pub struct BatchSuccess {
    /// 0-based position in the submitted variable-set sequence.
    pub index: usize,
    pub variables: VariableMap,
    pub invocation: Invocation,
}

/// One failed batch task, recorded against its stable index.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub index: usize,
    pub variables: VariableMap,
    pub error: String,
}

/// Aggregated partial-success report for a batch invocation.
///
/// Invariant: every submitted index appears in exactly one of
/// `successes`/`failures`. Entries are ordered by completion, not by index.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub successes: Vec<BatchSuccess>,
    pub failures: Vec<BatchFailure>,
}
