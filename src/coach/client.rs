//! Anthropic Messages API client
//!
//! A thin `reqwest` wrapper that implements [`LanguageModel`]. Settings come
//! from the environment so the data file never holds credentials.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::coach::{CoachError, LanguageModel};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
pub const MODEL_ENV: &str = "RESOLUTIONS_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for the Anthropic Messages API
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, CoachError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("resolution-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Build a client from `ANTHROPIC_API_KEY`, `ANTHROPIC_BASE_URL` and
    /// `RESOLUTIONS_MODEL`
    ///
    /// Only the key is required; a missing or blank key is a configuration
    /// error distinct from any network failure.
    pub fn from_env() -> Result<Self, CoachError> {
        let api_key = non_empty_var(API_KEY_ENV).ok_or(CoachError::MissingApiKey)?;
        let base_url = non_empty_var(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = non_empty_var(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        tracing::debug!("Using model {} at {}", model, base_url);
        Self::new(api_key, base_url, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CoachError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Sending {} prompt characters to {}", prompt.len(), self.model);

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!("Language model request failed with {}: {}", status, message);
            return Err(CoachError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response.json().await?;
        let text = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(CoachError::EmptyResponse);
        }
        Ok(text)
    }
}
