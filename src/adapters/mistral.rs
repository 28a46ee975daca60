//! Mistral AI request/response dialect.

use serde_json::{json, Value};

use crate::types::InferenceConfig;

pub(super) fn build_request(filled_template: &str, inference: &InferenceConfig) -> Value {
    json!({
        "prompt": filled_template,
        "max_tokens": inference.max_tokens_or_default(),
        "temperature": inference.temperature_or_default(),
        "top_p": inference.top_p_or_default(),
        "stop": inference.stop_sequences,
    })
}

/// Generation text lives at `outputs[0].text`.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("outputs")
        .and_then(Value::as_array)
        .and_then(|outputs| outputs.first())
        .and_then(|output| output.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
