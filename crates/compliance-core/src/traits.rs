use async_trait::async_trait;

use crate::types::{DocFilter, ScoredChunk};

/// Text → vector service. Implementations must return vectors of `dim()`
/// length for every input, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `openai:text-embedding-ada-002`).
    fn embedder_id(&self) -> &str;
    fn dim(&self) -> usize;
    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut out = self.embed_batch(&[text.to_string()]).await?;
        out.pop().ok_or_else(|| anyhow::anyhow!("embedder returned no vector for query"))
    }
}

/// Read side of the persisted vector index.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Nearest candidates to `query_vec`, most similar first, each carrying its
    /// stored vector so callers can re-rank (MMR).
    async fn candidates(
        &self,
        query_vec: &[f32],
        fetch_k: usize,
        filter: Option<&DocFilter>,
    ) -> anyhow::Result<Vec<ScoredChunk>>;
}

/// Prompt → answer text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn model_name(&self) -> &str;
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
