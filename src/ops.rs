//! Tool-facing operation surface.
//!
//! `dispatch` maps a tool name plus a JSON argument object onto the bridge
//! operations and folds every outcome into a uniform envelope:
//! `{"success": true, ...payload}` on success, `{"success": false, "error"}`
//! otherwise. No error escapes this boundary; internally everything stays
//! `Result`-typed and only the envelope layer flattens it.

use serde_json::{json, Map, Value};

use crate::error::PromptError;
use crate::invoker::PromptBridge;
use crate::types::{BatchReport, Invocation, PromptPage, StreamingInvocation, VariableMap};

const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_BATCH_WORKERS: usize = 5;

impl PromptBridge {
    /// List a page of prompt summaries from the catalog.
    pub async fn list_prompts(
        &self,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<PromptPage, PromptError> {
        self.catalog.list_prompts(max_results, next_token).await
    }

    /// Fetch the full definition of one prompt.
    pub async fn get_prompt_details(
        &self,
        prompt_id: &str,
        version: Option<&str>,
    ) -> Result<crate::types::PromptDefinition, PromptError> {
        self.catalog.get_prompt(prompt_id, version).await
    }

    /// List catalog versions of one prompt.
    pub async fn list_prompt_versions(
        &self,
        prompt_id: &str,
        max_results: u32,
    ) -> Result<PromptPage, PromptError> {
        self.catalog
            .list_prompt_versions(prompt_id, max_results)
            .await
    }

    /// Execute one named tool against a JSON argument object.
    ///
    /// Always returns an envelope value; unknown tool names and argument
    /// errors are reported the same way as downstream failures.
    pub async fn dispatch(&self, tool: &str, arguments: &Value) -> Value {
        match self.dispatch_inner(tool, arguments).await {
            Ok(payload) => success_envelope(payload),
            Err(e) => {
                tracing::warn!(tool, "tool call failed: {e}");
                error_envelope(&e)
            }
        }
    }

    async fn dispatch_inner(
        &self,
        tool: &str,
        arguments: &Value,
    ) -> Result<Map<String, Value>, PromptError> {
        match tool {
            "list_prompts" => {
                let max_results = optional_u32(arguments, "max_results")?
                    .unwrap_or(DEFAULT_PAGE_SIZE);
                let next_token = optional_str(arguments, "next_token")?;
                let page = self.list_prompts(max_results, next_token.as_deref()).await?;
                Ok(page_payload("prompts", page))
            }
            "get_prompt_details" => {
                let prompt_id = required_str(arguments, "prompt_identifier")?;
                let version = optional_str(arguments, "prompt_version")?;
                let definition = self
                    .get_prompt_details(&prompt_id, version.as_deref())
                    .await?;
                let mut payload = Map::new();
                payload.insert("prompt".into(), serde_json::to_value(&definition)?);
                Ok(payload)
            }
            "invoke_prompt" => {
                if arguments.get("stream").and_then(Value::as_bool) == Some(true) {
                    return Err(PromptError::UnsupportedOperation(
                        "streaming requires the invoke_prompt_streaming tool".into(),
                    ));
                }
                let prompt_id = required_str(arguments, "prompt_identifier")?;
                let variables = optional_variables(arguments, "prompt_variables")?;
                let version = optional_str(arguments, "prompt_version")?;
                let invocation = self
                    .invoke(&prompt_id, &variables, version.as_deref())
                    .await?;
                Ok(invocation_payload(&invocation))
            }
            "invoke_prompt_streaming" => {
                let prompt_id = required_str(arguments, "prompt_identifier")?;
                let variables = optional_variables(arguments, "prompt_variables")?;
                let version = optional_str(arguments, "prompt_version")?;
                let invocation = self
                    .invoke_streaming(&prompt_id, &variables, version.as_deref())
                    .await?;
                Ok(streaming_payload(&invocation))
            }
            "batch_invoke_prompt" => {
                let prompt_id = required_str(arguments, "prompt_identifier")?;
                let variable_sets = required_variable_sets(arguments, "variable_sets")?;
                let version = optional_str(arguments, "prompt_version")?;
                let workers = optional_u32(arguments, "max_workers")?
                    .map(|v| v as usize)
                    .unwrap_or(DEFAULT_BATCH_WORKERS);
                let report = self
                    .invoke_batch(&prompt_id, variable_sets, version.as_deref(), workers)
                    .await?;
                Ok(batch_payload(&prompt_id, &report))
            }
            "list_prompt_versions" => {
                let prompt_id = required_str(arguments, "prompt_identifier")?;
                let max_results = optional_u32(arguments, "max_results")?
                    .unwrap_or(DEFAULT_PAGE_SIZE);
                let page = self.list_prompt_versions(&prompt_id, max_results).await?;
                Ok(page_payload("versions", page))
            }
            other => Err(PromptError::InvalidParameter(format!(
                "Unknown tool: {other}"
            ))),
        }
    }
}

pub fn success_envelope(payload: Map<String, Value>) -> Value {
    let mut envelope = Map::with_capacity(payload.len() + 1);
    envelope.insert("success".into(), Value::Bool(true));
    envelope.extend(payload);
    Value::Object(envelope)
}

pub fn error_envelope(error: &PromptError) -> Value {
    json!({ "success": false, "error": error.to_string() })
}

fn invocation_payload(invocation: &Invocation) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("completion".into(), invocation.completion.clone().into());
    payload.insert("model_id".into(), invocation.model_id.clone().into());
    payload.insert(
        "model_family".into(),
        invocation.model_family.as_str().into(),
    );
    payload.insert("prompt_id".into(), invocation.prompt_id.clone().into());
    payload.insert(
        "filled_template".into(),
        invocation.filled_template.clone().into(),
    );
    payload.insert(
        "metadata".into(),
        json!({ "response_body": invocation.raw_response }),
    );
    payload
}

fn streaming_payload(invocation: &StreamingInvocation) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("completion".into(), invocation.completion.clone().into());
    payload.insert("chunks".into(), json!(invocation.chunks));
    payload.insert("chunk_count".into(), invocation.chunks.len().into());
    payload.insert("model_id".into(), invocation.model_id.clone().into());
    payload.insert(
        "model_family".into(),
        invocation.model_family.as_str().into(),
    );
    payload.insert("prompt_id".into(), invocation.prompt_id.clone().into());
    payload.insert(
        "filled_template".into(),
        invocation.filled_template.clone().into(),
    );
    payload
}

fn batch_payload(prompt_id: &str, report: &BatchReport) -> Map<String, Value> {
    let results: Vec<Value> = report
        .successes
        .iter()
        .map(|s| {
            json!({
                "index": s.index,
                "variables": s.variables,
                "result": Value::Object(invocation_payload(&s.invocation)),
            })
        })
        .collect();
    let errors: Vec<Value> = report
        .failures
        .iter()
        .map(|f| {
            json!({
                "index": f.index,
                "variables": f.variables,
                "error": f.error,
            })
        })
        .collect();

    let mut payload = Map::new();
    payload.insert("total_invocations".into(), report.total.into());
    payload.insert("successful".into(), report.successes.len().into());
    payload.insert("failed".into(), report.failures.len().into());
    payload.insert("results".into(), Value::Array(results));
    payload.insert("errors".into(), Value::Array(errors));
    payload.insert("prompt_id".into(), prompt_id.into());
    payload
}

fn page_payload(items_key: &str, page: PromptPage) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(items_key.into(), json!(page.items));
    payload.insert("nextToken".into(), json!(page.next_token));
    payload
}

fn required_str(arguments: &Value, key: &str) -> Result<String, PromptError> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            PromptError::InvalidParameter(format!("missing required argument: {key}"))
        })
}

fn optional_str(arguments: &Value, key: &str) -> Result<Option<String>, PromptError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PromptError::InvalidParameter(format!(
            "argument {key} must be a string"
        ))),
    }
}

fn optional_u32(arguments: &Value, key: &str) -> Result<Option<u32>, PromptError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as u32))
            .ok_or_else(|| {
                PromptError::InvalidParameter(format!(
                    "argument {key} must be a non-negative integer"
                ))
            }),
    }
}

/// Decode a JSON object into a variable mapping. Non-string values are
/// carried through via their JSON rendering so callers can pass numbers.
fn optional_variables(arguments: &Value, key: &str) -> Result<VariableMap, PromptError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(VariableMap::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(name, value)| (name.clone(), stringify(value)))
            .collect()),
        Some(_) => Err(PromptError::InvalidParameter(format!(
            "argument {key} must be an object"
        ))),
    }
}

fn required_variable_sets(
    arguments: &Value,
    key: &str,
) -> Result<Vec<VariableMap>, PromptError> {
    let sets = arguments.get(key).and_then(Value::as_array).ok_or_else(|| {
        PromptError::InvalidParameter(format!("missing required argument: {key}"))
    })?;
    sets.iter()
        .map(|entry| match entry {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(name, value)| (name.clone(), stringify(value)))
                .collect()),
            _ => Err(PromptError::InvalidParameter(format!(
                "every entry of {key} must be an object"
            ))),
        })
        .collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
