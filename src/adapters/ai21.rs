//! AI21 Labs (Jurassic) request/response dialect, camelCase fields.

use serde_json::{json, Value};

use crate::types::InferenceConfig;

pub(super) fn build_request(filled_template: &str, inference: &InferenceConfig) -> Value {
    json!({
        "prompt": filled_template,
        "maxTokens": inference.max_tokens_or_default(),
        "temperature": inference.temperature_or_default(),
        "topP": inference.top_p_or_default(),
        "stopSequences": inference.stop_sequences,
    })
}

/// Generation text lives at `completions[0].data.text`.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("completions")
        .and_then(Value::as_array)
        .and_then(|completions| completions.first())
        .and_then(|completion| completion.get("data"))
        .and_then(|data| data.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
