//! OpenAI-compatible `/embeddings` client.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use compliance_core::config::OpenAiSettings;
use compliance_core::error::Error;
use compliance_core::traits::Embedder;

pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dim: usize,
    id: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
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
            model: settings.embedding_model.clone(),
            dim: settings.embedding_dim,
            id: format!("openai:{}:d{}", settings.embedding_model, settings.embedding_dim),
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn embedder_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/embeddings", self.base_url);
        debug!("Embedding {} texts with {}", texts.len(), self.model);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest { model: &self.model, input: texts })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Remote { service: "embeddings", status: status.as_u16(), body }.into());
        }
        let mut parsed: EmbeddingResponse = resp.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(Error::Operation(format!(
                "embedder returned {} vectors for {} inputs",
                parsed.data.len(),
                texts.len()
            ))
            .into());
        }
        parsed.data.sort_by_key(|d| d.index);
        let mut out = Vec::with_capacity(parsed.data.len());
        for d in parsed.data {
            if d.embedding.len() != self.dim {
                return Err(Error::DimensionMismatch { got: d.embedding.len(), expected: self.dim }.into());
            }
            out.push(d.embedding);
        }
        Ok(out)
    }
}
