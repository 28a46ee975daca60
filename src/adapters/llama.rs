//! Meta Llama request/response dialect.
//!
//! Llama takes no stop sequences on Bedrock; the field is dropped rather
//! than sent under a foreign name.

use serde_json::{json, Value};

use crate::types::InferenceConfig;

pub(super) fn build_request(filled_template: &str, inference: &InferenceConfig) -> Value {
    json!({
        "prompt": filled_template,
        "max_gen_len": inference.max_tokens_or_default(),
        "temperature": inference.temperature_or_default(),
        "top_p": inference.top_p_or_default(),
    })
}

/// Generation text lives at the top-level `generation` field.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("generation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_flat_prompt_body() {
        let body = build_request("q", &InferenceConfig::default());
        assert_eq!(body["prompt"], "q");
        assert_eq!(body["max_gen_len"], 2000);
        assert!(body.get("stop").is_none());
    }

    #[test]
    fn parses_generation_field() {
        assert_eq!(parse_response(&json!({ "generation": "out" })), "out");
        assert_eq!(parse_response(&json!({ "generation": 7 })), "");
    }
}
