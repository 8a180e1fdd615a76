// src/services/gemini.rs
//! Client for the Generative Language `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::conversation::{ChatSession, Content, GenerationConfig, Role};
use super::upstream::{ChatModel, UpstreamError};
use crate::config::Config;

const API_VERSION: &str = "v1beta";
const BAD_FINISH_REASONS: [&str; 2] = ["SAFETY", "RECITATION"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content>,
    pub generation_config: &'a GenerationConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Plain text of the first candidate. With no candidates the reply is
    /// empty, unless the provider attached prompt feedback, which means the
    /// prompt itself was refused. A safety/recitation stop is an error too.
    pub fn text(&self) -> Result<String, UpstreamError> {
        let Some(candidate) = self.candidates.first() else {
            return match &self.prompt_feedback {
                Some(feedback) => Err(UpstreamError::Blocked(format!(
                    "prompt blocked: {}",
                    feedback.block_reason.as_deref().unwrap_or("no reason given")
                ))),
                None => Ok(String::new()),
            };
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if BAD_FINISH_REASONS.contains(&reason) {
                return Err(UpstreamError::Blocked(format!("candidate stopped: {}", reason)));
            }
        }

        let text = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<String>();
        Ok(text)
    }
}

/// Mirrors the provider SDK's local check on chat history.
pub fn validate_history(history: &[Content]) -> Result<(), UpstreamError> {
    if let Some(first) = history.first() {
        if first.role != Role::User {
            return Err(UpstreamError::InvalidHistory(
                "first content should be with role 'user', got 'model'".to_string(),
            ));
        }
    }
    if let Some(pos) = history.iter().position(|c| c.parts.is_empty()) {
        return Err(UpstreamError::InvalidHistory(format!("content at index {} has no parts", pos)));
    }
    Ok(())
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/{}/models/{}:generateContent",
                config.base_url, API_VERSION, config.model
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn send_message(&self, session: &ChatSession, message: &str) -> Result<String, UpstreamError> {
        validate_history(&session.history)?;

        let request = GenerateContentRequest {
            contents: session.contents_with(message),
            generation_config: &session.generation_config,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.text()
    }
}
