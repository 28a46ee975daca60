//! Anthropic Claude request/response dialect (messages API).

use serde_json::{json, Value};

use crate::types::InferenceConfig;

use super::{field_as_i64, AdditionalFields};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub(super) fn build_request(
    filled_template: &str,
    inference: &InferenceConfig,
    additional_fields: &AdditionalFields,
) -> Value {
    let mut body = json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": inference.max_tokens_or_default(),
        "temperature": inference.temperature_or_default(),
        "top_p": inference.top_p_or_default(),
        "messages": [{ "role": "user", "content": filled_template }],
    });

    if let Some(top_k) = field_as_i64(additional_fields, "top_k") {
        body["top_k"] = json!(top_k);
    }
    if !inference.stop_sequences.is_empty() {
        body["stop_sequences"] = json!(inference.stop_sequences);
    }

    body
}

/// Generation text lives at `content[0].text`.
pub(super) fn parse_response(raw: &Value) -> String {
    raw.get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_messages_body_with_defaults() {
        let body = build_request("Answer: 2+2?", &InferenceConfig::default(), &AdditionalFields::new());
        assert_eq!(body["anthropic_version"], ANTHROPIC_VERSION);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["top_p"], 0.999);
        assert_eq!(body["messages"], json!([{ "role": "user", "content": "Answer: 2+2?" }]));
        assert!(body.get("top_k").is_none());
        assert!(body.get("stop_sequences").is_none());
    }

    #[test]
    fn passes_top_k_and_stop_sequences_through() {
        let inference = InferenceConfig {
            stop_sequences: vec!["END".into()],
            ..Default::default()
        };
        let mut fields = AdditionalFields::new();
        fields.insert("top_k".into(), json!(50));

        let body = build_request("hi", &inference, &fields);
        assert_eq!(body["top_k"], 50);
        assert_eq!(body["stop_sequences"], json!(["END"]));
    }

    #[test]
    fn parses_first_content_block() {
        let raw = json!({ "content": [{ "type": "text", "text": "four" }, { "text": "extra" }] });
        assert_eq!(parse_response(&raw), "four");
        assert_eq!(parse_response(&json!({ "content": [] })), "");
    }
}
