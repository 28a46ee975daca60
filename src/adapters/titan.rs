//! Amazon Titan request/response dialect.

use serde_json::{json, Value};

use crate::types::InferenceConfig;

pub(super) fn build_request(filled_template: &str, inference: &InferenceConfig) -> Value {
    json!({
        "inputText": filled_template,
        "textGenerationConfig": {
            "maxTokenCount": inference.max_tokens_or_default(),
            "temperature": inference.temperature_or_default(),
            "topP": inference.top_p_or_default(),
            "stopSequences": inference.stop_sequences,
        },
    })
}

/// Generation text lives at `results[0].outputText`.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .and_then(|result| result.get("outputText"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
