//! Incremental decoding of provider-native stream events.
//!
//! Each family tags its streaming events differently. Claude interleaves
//! lifecycle events (`message_start`, `content_block_stop`, ...) with
//! `content_block_delta` events, and only the deltas carry text. Titan emits
//! one `outputText` per event. Every other family has no structured decode
//! rule: the whole raw event is stringified as its own chunk, an intentional
//! graceful degradation since partial output is still useful.
//!
//! Arrival order from the transport is authoritative; nothing here reorders
//! or deduplicates.

use serde_json::Value;

use crate::family::ModelFamily;

/// Extract the incremental text carried by one stream event, if any.
pub fn decode_event(family: ModelFamily, event: &Value) -> Option<String> {
    match family {
        ModelFamily::Claude => {
            if event.get("type").and_then(Value::as_str) != Some("content_block_delta") {
                return None;
            }
            event
                .get("delta")
                .and_then(|delta| delta.get("text"))
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        }
        ModelFamily::Titan => event
            .get("outputText")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        _ => Some(event.to_string()),
    }
}

/// Accumulates decoded chunks in arrival order.
#[derive(Debug, Default)]
pub struct ChunkAccumulator {
    completion: String,
    chunks: Vec<String>,
}

impl ChunkAccumulator {
    pub fn push(&mut self, text: String) {
        self.completion.push_str(&text);
        self.chunks.push(text);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// (full completion, ordered chunk list)
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.completion, self.chunks)
    }
}
