// src/services/conversation.rs
use serde::{Deserialize, Serialize};

use crate::message::{ChatTurn, USER_SENDER};

/// The two roles the model API understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Only the literal `"user"` sender is the end user; anything else,
    /// including unknown senders such as `"system"`, is treated as the model.
    pub fn from_sender(sender: &str) -> Self {
        if sender == USER_SENDER {
            Role::User
        } else {
            Role::Model
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self { role, parts: vec![Part { text: text.into() }] }
    }
}

impl From<&ChatTurn> for Content {
    fn from(turn: &ChatTurn) -> Self {
        Content::text(Role::from_sender(&turn.sender), turn.text.clone())
    }
}

/// Order-preserving, one `Content` per turn.
pub fn map_history(turns: &[ChatTurn]) -> Vec<Content> {
    turns.iter().map(Content::from).collect()
}

/// Sampling parameters sent with every request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 200,
        }
    }
}

/// A conversation seeded from client history, built fresh for each request.
#[derive(Clone, Debug)]
pub struct ChatSession {
    pub history: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl ChatSession {
    pub fn start(turns: &[ChatTurn]) -> Self {
        Self {
            history: map_history(turns),
            generation_config: GenerationConfig::default(),
        }
    }

    /// History followed by `message` as the newest user turn.
    pub fn contents_with(&self, message: &str) -> Vec<Content> {
        let mut contents = Vec::with_capacity(self.history.len() + 1);
        contents.extend(self.history.iter().cloned());
        contents.push(Content::text(Role::User, message));
        contents
    }
}
