use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{AppError, MESSAGE_NOT_TEXT},
    message::{ChatRequest, ChatResponse, ChatTurn},
    services::chatbot::generate_reply,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // An unreadable body carries no message, so it fails the same way an empty one does.
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "could not read chat request body");
        AppError::empty_message()
    })?;

    let request = parse_request(body)?;
    let reply = generate_reply(state.model.as_ref(), &request).await?;

    Ok(Json(ChatResponse { reply }))
}

/// `message` is checked before `history`: a bad message is the caller's
/// fault (400), a bad history with a usable message is a processing failure.
pub fn parse_request(mut body: Value) -> Result<ChatRequest, AppError> {
    let message = match body.get_mut("message").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(_) => return Err(AppError::BadRequest(MESSAGE_NOT_TEXT.to_string())),
    };

    if message.as_deref().is_none_or(|m| m.trim().is_empty()) {
        return Err(AppError::empty_message());
    }

    let history = match body.get_mut("history").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            serde_json::from_value::<Vec<ChatTurn>>(raw).map_err(AppError::MalformedHistory)?,
        ),
    };

    Ok(ChatRequest { message, history })
}
