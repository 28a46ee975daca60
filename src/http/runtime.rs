//! Inference endpoint over the bedrock-runtime REST surface.
//!
//! Streaming responses are consumed as SSE messages whose `data:` payload is
//! one JSON event object. Empty payloads and `[DONE]` markers are ignored; a
//! payload that fails to parse is skipped rather than aborting the stream,
//! since partial output is still useful downstream.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::error::PromptError;
use crate::transport::{JsonEventStream, ModelRuntime};

use super::{build_client, check_status, join_url};

const DONE_MARKER: &str = "[DONE]";

pub struct HttpModelRuntime {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelRuntime {
    pub fn new(config: &BridgeConfig) -> Result<Self, PromptError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.runtime_base_url.clone(),
        })
    }

    fn model_url(&self, model_id: &str, action: &str) -> String {
        join_url(
            &self.base_url,
            &format!("model/{}/{action}", urlencoding::encode(model_id)),
        )
    }
}

#[async_trait]
impl ModelRuntime for HttpModelRuntime {
    async fn invoke(&self, model_id: &str, body: &Value) -> Result<Value, PromptError> {
        tracing::debug!(model_id, "invoking model");
        let response = self
            .client
            .post(self.model_url(model_id, "invoke"))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| PromptError::ParseError(format!("invoke response: {e}")))
    }

    async fn invoke_stream(
        &self,
        model_id: &str,
        body: &Value,
    ) -> Result<JsonEventStream, PromptError> {
        tracing::debug!(model_id, "invoking model with response stream");
        let response = self
            .client
            .post(self.model_url(model_id, "invoke-with-response-stream"))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let stream = async_stream::stream! {
            let mut events = response.bytes_stream().eventsource();
            while let Some(item) = events.next().await {
                let event = match item {
                    Ok(event) => event,
                    Err(e) => {
                        yield Err(PromptError::StreamError(format!("SSE stream error: {e}")));
                        return;
                    }
                };

                let data = event.data.trim();
                if data.is_empty() || data == DONE_MARKER {
                    continue;
                }

                match serde_json::from_str::<Value>(data) {
                    Ok(payload) => yield Ok(payload),
                    Err(e) => {
                        // Malformed single event: skip, keep the stream alive.
                        tracing::warn!("skipping undecodable stream event: {e}");
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
