// src/services/chatbot.rs
use tracing::debug;

use super::conversation::ChatSession;
use super::upstream::ChatModel;
use crate::{error::AppError, message::ChatRequest};

/// Returns the message to relay, or `None` when it is missing or blank.
pub fn validate_message(request: &ChatRequest) -> Option<&str> {
    request
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
}

/// Validate the request, seed a fresh session from its history and ask the
/// model for a reply. Nothing is sent upstream when validation fails.
pub async fn generate_reply(model: &dyn ChatModel, request: &ChatRequest) -> Result<String, AppError> {
    let message = validate_message(request).ok_or_else(AppError::empty_message)?;

    let history = request.history.as_deref().unwrap_or_default();
    let session = ChatSession::start(history);
    debug!(history_len = history.len(), "relaying message to model");

    let reply = model.send_message(&session, message).await?;
    Ok(reply)
}
