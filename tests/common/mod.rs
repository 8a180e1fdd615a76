#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chat_relay::routes::create_router;
use chat_relay::services::conversation::{ChatSession, Content};
use chat_relay::services::upstream::{ChatModel, UpstreamError};
use chat_relay::state::AppState;
use tower::util::ServiceExt;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub history: Vec<Content>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Fail(String),
}

/// In-memory model that records every call and answers with a fixed reply.
#[derive(Debug, Clone)]
pub struct StubModel {
    reply: StubReply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self { reply: StubReply::Text(text.to_string()), calls: Arc::default() }
    }

    pub fn failing(detail: &str) -> Self {
        Self { reply: StubReply::Fail(detail.to_string()), calls: Arc::default() }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn send_message(&self, session: &ChatSession, message: &str) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(RecordedCall {
            history: session.history.clone(),
            message: message.to_string(),
        });
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Fail(detail) => Err(UpstreamError::Status { status: 503, body: detail.clone() }),
        }
    }
}

pub async fn post_chat(model: &StubModel, body: &str) -> Response<Body> {
    let app = create_router().with_state(AppState::shared(model.clone()));
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
