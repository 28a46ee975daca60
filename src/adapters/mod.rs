//! Per-family request builders and response parsers.
//!
//! Every family speaks the same semantic fields (generation text, token
//! budget, temperature, nucleus-sampling probability, stop sequences) with
//! its own field names and nesting. Builders and parsers are pure functions
//! over JSON values; the family set is closed, so dispatch is a plain match
//! rather than dynamic dispatch.
//!
//! An absent or empty response field yields an empty completion string,
//! never an error.

mod ai21;
mod claude;
mod cohere;
mod llama;
mod mistral;
mod titan;

use serde_json::Value;

use crate::family::ModelFamily;
use crate::types::InferenceConfig;

/// Provider-specific extra request parameters from the prompt variant.
pub type AdditionalFields = serde_json::Map<String, Value>;

/// Build the provider-specific request body for one invocation.
///
/// `Unknown` falls back to the Claude adapter, the first-listed family.
pub fn build_request(
    family: ModelFamily,
    filled_template: &str,
    inference: &InferenceConfig,
    additional_fields: &AdditionalFields,
) -> Value {
    match family {
        ModelFamily::Claude | ModelFamily::Unknown => {
            claude::build_request(filled_template, inference, additional_fields)
        }
        ModelFamily::Titan => titan::build_request(filled_template, inference),
        ModelFamily::Llama => llama::build_request(filled_template, inference),
        ModelFamily::Mistral => mistral::build_request(filled_template, inference),
        ModelFamily::Cohere => cohere::build_request(filled_template, inference),
        ModelFamily::Ai21 => ai21::build_request(filled_template, inference),
    }
}

/// Extract the generation text from a provider-specific response body.
pub fn parse_response(family: ModelFamily, raw: &Value) -> String {
    match family {
        ModelFamily::Claude | ModelFamily::Unknown => claude::parse_response(raw),
        ModelFamily::Titan => titan::parse_response(raw),
        ModelFamily::Llama => llama::parse_response(raw),
        ModelFamily::Mistral => mistral::parse_response(raw),
        ModelFamily::Cohere => cohere::parse_response(raw),
        ModelFamily::Ai21 => ai21::parse_response(raw),
    }
}

/// Integer coercion for pass-through fields such as `top_k`, which may
/// arrive as a number or a numeric string.
pub(crate) fn field_as_i64(fields: &AdditionalFields, key: &str) -> Option<i64> {
    let value = fields.get(key)?;
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
