// src/message.rs
use serde::{Deserialize, Serialize};

/// Sender value that marks a turn as written by the end user.
pub const USER_SENDER: &str = "user";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

/// One earlier message of the conversation, as the client keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub text: String,
}

impl ChatTurn {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self { sender: sender.into(), text: text.into() }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
