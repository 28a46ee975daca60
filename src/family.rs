//! Model family classification.
//!
//! Bedrock hosts heterogeneous model providers behind one invocation
//! endpoint; the request and response dialect is determined by the model
//! identifier alone. Classification is a pure, total function: every input
//! maps to exactly one family, with [`ModelFamily::Unknown`] as the
//! catch-all.

use serde::{Deserialize, Serialize};

/// The provider dialect a model identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Claude,
    Titan,
    Llama,
    Mistral,
    Cohere,
    Ai21,
    Unknown,
}

/// Marker table, in priority order. The first family whose marker appears in
/// the lowercased model id wins.
const FAMILY_MARKERS: &[(ModelFamily, &[&str])] = &[
    (ModelFamily::Claude, &["claude", "anthropic"]),
    (ModelFamily::Titan, &["titan"]),
    (ModelFamily::Llama, &["llama", "meta"]),
    (ModelFamily::Mistral, &["mistral"]),
    (ModelFamily::Cohere, &["cohere"]),
    (ModelFamily::Ai21, &["ai21", "jurassic"]),
];

impl ModelFamily {
    /// Classify a model identifier by case-insensitive substring match.
    ///
    /// Never fails and performs no I/O.
    pub fn classify(model_id: &str) -> Self {
        let id = model_id.to_ascii_lowercase();
        FAMILY_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| id.contains(m)))
            .map(|(family, _)| *family)
            .unwrap_or(ModelFamily::Unknown)
    }

    /// Stable lowercase name as used in serialized envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Claude => "claude",
            ModelFamily::Titan => "titan",
            ModelFamily::Llama => "llama",
            ModelFamily::Mistral => "mistral",
            ModelFamily::Cohere => "cohere",
            ModelFamily::Ai21 => "ai21",
            ModelFamily::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
