//! Bridge between a tool-calling agent surface and managed prompt catalogs
//! backed by multi-family inference endpoints.
//!
//! The crate resolves a named prompt (variant selection, template rendering),
//! classifies the target model into a provider family, builds the
//! family-specific request body, invokes the model (single call, streaming,
//! or bounded-concurrency batch) and parses the completion back out.
//!
//! [`PromptBridge`] is the entry point; it talks to the two external
//! collaborators through the [`transport::PromptCatalog`] and
//! [`transport::ModelRuntime`] traits, with HTTP implementations in
//! [`http`]. The [`PromptBridge::dispatch`] method exposes the six tool
//! operations behind a uniform `{"success": ...}` JSON envelope.

#![deny(unsafe_code)]

pub mod adapters;
mod batch;
pub mod config;
pub mod error;
pub mod family;
pub mod http;
mod invoker;
mod ops;
pub mod streaming;
pub mod template;
pub mod transport;
pub mod types;

pub use batch::{MAX_CONCURRENCY, MIN_CONCURRENCY};
pub use config::BridgeConfig;
pub use error::PromptError;
pub use family::ModelFamily;
pub use http::{HttpModelRuntime, HttpPromptCatalog};
pub use invoker::PromptBridge;
pub use ops::{error_envelope, success_envelope};
pub use transport::{JsonEventStream, ModelRuntime, PromptCatalog};
pub use types::{
    BatchFailure, BatchReport, BatchSuccess, InferenceConfig, Invocation, PromptDefinition,
    PromptPage, PromptSummary, PromptVariant, StreamingInvocation, VariableMap,
};
