//! Cohere request/response dialect. Nucleus sampling is called `p` here.

use serde_json::{json, Value};

use crate::types::InferenceConfig;

pub(super) fn build_request(filled_template: &str, inference: &InferenceConfig) -> Value {
    json!({
        "prompt": filled_template,
        "max_tokens": inference.max_tokens_or_default(),
        "temperature": inference.temperature_or_default(),
        "p": inference.top_p_or_default(),
        "stop_sequences": inference.stop_sequences,
    })
}

/// Generation text lives at `generations[0].text`.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("generations")
        .and_then(Value::as_array)
        .and_then(|generations| generations.first())
        .and_then(|generation| generation.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
