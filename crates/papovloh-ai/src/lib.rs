//! Generation Gateway for PapovLoh.
//!
//! The only place that talks to the hosted model API:
//! - chat turns with history, a persona instruction and two callable tools
//! - image synthesis from a prompt
//! - grounded research at a quick or deep level
//!
//! `GenerationGateway` is the seam the conversation layer depends on;
//! `GeminiClient` is the HTTP implementation.

pub mod gemini;
pub mod image;
pub mod research;
pub mod tools;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use gemini::{GeminiClient, GeminiConfig};
pub use image::{ImageData, ImageError};
pub use research::{collect_sources, extract_sources, RawSource, ResearchDepth, ResearchResult, Source};
pub use tools::{tool_declarations, ToolDefinition, ToolInvocation};

#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Send one chat turn. `history` holds the prior turns only; `prompt`
    /// is the new user text.
    async fn send_chat_turn(
        &self,
        history: &[HistoryEntry],
        prompt: &str,
        system_instruction: &str,
    ) -> Result<ModelReply, GatewayError>;

    async fn generate_image(&self, prompt: &str) -> Result<ImageData, GatewayError>;

    async fn conduct_research(
        &self,
        query: &str,
        depth: ResearchDepth,
    ) -> Result<ResearchResult, GatewayError>;
}

/// Author of a history turn, in the gateway's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

impl HistoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Model => "model",
        }
    }
}

/// One text-only turn of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub text: String,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Model,
            text: text.into(),
        }
    }
}

/// What the model answered with: free text, or one or more tool calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    PlainText(String),
    ToolCalls(Vec<ToolInvocation>),
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No credential available at call time.
    #[error("API key not configured: {0}")]
    Configuration(String),
    #[error("API error: {0}")]
    Remote(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Missing credentials are fatal to every call; everything else is an
    /// upstream failure the caller recovers from.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration(_))
    }
}
