// src/services/upstream.rs
use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use super::conversation::ChatSession;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("reply was blocked: {0}")]
    Blocked(String),

    #[error("history rejected before sending: {0}")]
    InvalidHistory(String),
}

/// A hosted conversational model. `GeminiClient` talks to the real one;
/// tests swap in stubs.
#[async_trait]
pub trait ChatModel: Send + Sync + Debug + 'static {
    /// Submit `message` as the newest user turn after the session's history
    /// and return the reply text.
    async fn send_message(&self, session: &ChatSession, message: &str) -> Result<String, UpstreamError>;
}
