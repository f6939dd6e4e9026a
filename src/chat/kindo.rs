//! Kindo chat-completion client.
//!
//! Kindo speaks the OpenAI chat-completion wire format but authenticates with
//! an `api-key` header, so requests are built with `async-openai` types and
//! sent with a plain `reqwest` client.

use super::{ChatCompletion, ChatOutcome};
use crate::config::{ApiKeys, Settings};
use crate::error::{Result, VidbriefError};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default timeout for chat requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the Kindo chat-completion endpoint.
pub struct KindoClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl KindoClient {
    /// Create a new client for the given endpoint.
    pub fn new(api_url: &str, api_key: &str, model: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Create a client from settings and the configured API key.
    pub fn from_settings(settings: &Settings, keys: &ApiKeys) -> Result<Self> {
        Self::new(&settings.kindo.api_url, keys.require_kindo()?, &settings.kindo.model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletion for KindoClient {
    #[instrument(skip(self, system, user), fields(model = %self.model))]
    async fn complete(&self, system: &str, user: &str) -> Result<ChatOutcome> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| VidbriefError::Chat(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| VidbriefError::Chat(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| VidbriefError::Chat(e.to_string()))?;

        let response = self
            .http
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Chat provider returned {}", status);
            return Ok(ChatOutcome::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VidbriefError::Chat("Empty response from LLM".to_string()))?;

        debug!("Received {} chars from chat provider", answer.len());
        Ok(ChatOutcome::Answer(answer))
    }
}
