use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use compliance_calc::{calculate_for, CalculationResult};
use compliance_core::config::Settings;
use compliance_core::traits::{ChatModel, Embedder};
use compliance_core::types::{Query, ScoredChunk, Scheme};
use compliance_embed::get_default_embedder;
use compliance_vector::table::read_meta;
use compliance_vector::{LanceChunkStore, Retriever};

use crate::booster::boost;
use crate::classify::classify;
use crate::llm::OpenAiChat;
use crate::prompt::{build_context, compose};
use crate::router::QueryRouter;

const PREVIEW_CHARS: usize = 300;

/// Where a context chunk came from, for `debug` responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalDebug {
    pub doc_name: String,
    pub source: String,
    pub page: u32,
    pub preview: String,
    pub score: f32,
}

impl RetrievalDebug {
    fn from_chunk(c: &ScoredChunk) -> Self {
        let preview: String = c.chunk.text.trim().chars().take(PREVIEW_CHARS).collect();
        Self {
            doc_name: c.chunk.doc_name.clone(),
            source: c.chunk.source.clone(),
            page: c.chunk.page,
            preview: preview.replace('\n', " "),
            score: c.score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub scheme: Option<Scheme>,
    pub calculation: Option<CalculationResult>,
    pub retrieval_debug: Vec<RetrievalDebug>,
}

/// The question-answering pipeline. Built once and shared read-only.
pub struct Copilot {
    retriever: Retriever,
    chat: Arc<dyn ChatModel>,
    router: QueryRouter,
}

impl Copilot {
    pub fn new(retriever: Retriever, chat: Arc<dyn ChatModel>, router: QueryRouter) -> Self {
        Self { retriever, chat, router }
    }

    /// Wire the production pipeline: configured embedder, the LanceDB index
    /// under `data.index_dir` and the OpenAI chat model.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let embedder: Arc<dyn Embedder> = Arc::from(get_default_embedder(&settings.openai)?);
        let store = LanceChunkStore::open(&settings.data.index_path(), &settings.data.table).await?;
        match read_meta(store.connection()).await? {
            Some(meta) if meta.embedder_id != embedder.embedder_id() => warn!(
                index = %meta.embedder_id,
                configured = %embedder.embedder_id(),
                "index was built with a different embedder; similarity scores will be meaningless"
            ),
            Some(meta) => info!(chunks = meta.chunk_count, built_at = %meta.built_at, "opened index"),
            None => warn!("index has no build metadata"),
        }
        let retriever = Retriever::new(embedder, Arc::new(store), settings.retrieval.clone());
        let chat = Arc::new(OpenAiChat::new(&settings.openai)?);
        Ok(Self::new(retriever, chat, QueryRouter::new(settings.documents.clone())))
    }

    pub fn model_name(&self) -> &str { self.chat.model_name() }

    pub async fn ask(&self, query: &Query) -> Result<AskOutcome> {
        let scheme = classify(&query.question);
        let calculation = scheme.map(|s| calculate_for(s, query));
        let filter = self.router.route(scheme, &query.state);
        let search_text = boost(query, scheme);

        let chunks = self.retriever.retrieve(&search_text, filter.as_ref()).await?;
        let context = build_context(&chunks);
        let prompt = compose(query, &context, calculation.as_ref());
        info!(scheme = ?scheme, chunks = chunks.len(), "answering question");

        let answer = self.chat.complete(&prompt).await?;
        let retrieval_debug = chunks.iter().filter(|c| !c.chunk.text.trim().is_empty()).map(RetrievalDebug::from_chunk).collect();
        Ok(AskOutcome { answer, scheme, calculation, retrieval_debug })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_core::types::DocumentChunk;

    #[test]
    fn preview_is_truncated_and_flattened() {
        let text = format!("line one\nline two {}", "x".repeat(400));
        let c = ScoredChunk { chunk: DocumentChunk::new("esi.pdf", "docs/esi.pdf", 4, 1, text), vector: vec![], score: 0.8 };
        let d = RetrievalDebug::from_chunk(&c);
        assert_eq!(d.preview.chars().count(), 300);
        assert!(d.preview.starts_with("line one line two"));
        assert_eq!(d.page, 4);
        assert_eq!(d.doc_name, "esi.pdf");
        assert_eq!(d.source, "docs/esi.pdf");
    }
}
