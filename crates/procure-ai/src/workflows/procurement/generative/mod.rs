//! Adapter for the external text-completion service.
//!
//! The gateway is an injected dependency with an explicit unconfigured state:
//! workflows hold `Option<Arc<dyn CompletionGateway>>` and skip the network
//! entirely when it is `None`. Every failure mode of a configured gateway is
//! a `CompletionError`, which call sites treat uniformly as "service
//! unavailable" and answer with the deterministic fallback.

mod client;
mod parser;
pub(crate) mod prompts;

pub use client::HttpCompletionClient;
pub use parser::GenerativeParser;

use async_trait::async_trait;

/// Two-part instruction sent to the completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub json_only: bool,
}

/// Error raised by a configured completion gateway. Single attempt only; no
/// retries or backoff anywhere in this module.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion transport failed: {0}")]
    Transport(String),
    #[error("completion service returned status {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("completion response was not usable: {0}")]
    InvalidResponse(String),
}

/// Text-completion collaborator boundary.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
