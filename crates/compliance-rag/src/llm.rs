//! OpenAI-compatible chat-completions client.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use compliance_core::config::OpenAiSettings;
use compliance_core::error::Error;
use compliance_core::traits::ChatModel;

pub struct OpenAiChat {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(settings: &OpenAiSettings) -> Result<Self> {
        let api_key = settings.resolved_api_key();
        if api_key.is_empty() {
            return Err(Error::InvalidConfig("OpenAI API key missing: set OPENAI_API_KEY or openai.api_key".into()).into());
        }
        let client = reqwest::Client::builder().timeout(Duration::from_secs(settings.timeout_secs)).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.chat_model.clone(),
            temperature: settings.temperature,
        })
    }

    /// First characters of the key, for diagnostics output.
    pub fn masked_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(7).collect();
        format!("{prefix}...")
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    fn model_name(&self) -> &str { &self.model }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };
        debug!(model = %self.model, prompt_chars = prompt.len(), "chat completion");
        let resp = self.client.post(&url).bearer_auth(&self.api_key).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Remote { service: "chat", status: status.as_u16(), body }.into());
        }
        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("chat completion returned no content"))
    }
}
