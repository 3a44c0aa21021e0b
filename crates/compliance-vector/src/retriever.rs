use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use compliance_core::config::RetrievalSettings;
use compliance_core::traits::{ChunkStore, Embedder};
use compliance_core::types::{DocFilter, ScoredChunk};

use crate::mmr;

/// Embeds a search text, pulls `fetch_k` candidates from the store and keeps
/// `k` of them by maximum marginal relevance.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn ChunkStore>,
    settings: RetrievalSettings,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn ChunkStore>, settings: RetrievalSettings) -> Self {
        Self { embedder, store, settings }
    }

    pub fn settings(&self) -> &RetrievalSettings { &self.settings }

    pub fn embedder_id(&self) -> &str { self.embedder.embedder_id() }

    /// Retrieve up to `k` chunks. A store failure under a document filter is
    /// retried once without the filter.
    pub async fn retrieve(&self, text: &str, filter: Option<&DocFilter>) -> Result<Vec<ScoredChunk>> {
        let query_vec = self.embedder.embed_query(text).await?;
        let fetch_k = self.settings.fetch_k.max(self.settings.k);
        let candidates = match self.store.candidates(&query_vec, fetch_k, filter).await {
            Ok(c) => c,
            Err(e) if filter.is_some() => {
                warn!(error = %e, "filtered search failed; retrying without document filter");
                self.store.candidates(&query_vec, fetch_k, None).await?
            }
            Err(e) => return Err(e),
        };
        debug!(candidates = candidates.len(), "mmr over candidates");
        Ok(mmr::select(&query_vec, candidates, self.settings.k, self.settings.lambda_mult))
    }
}
