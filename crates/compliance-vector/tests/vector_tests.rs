use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use compliance_core::config::RetrievalSettings;
use compliance_core::traits::{ChunkStore, Embedder};
use compliance_core::types::{DocFilter, DocumentChunk, ScoredChunk};
use compliance_embed::FakeEmbedder;
use compliance_vector::table::{open_db, read_meta};
use compliance_vector::{build_index, LanceChunkStore, Retriever};

const TABLE: &str = "chunks_test";

fn corpus() -> Vec<DocumentChunk> {
    vec![
        DocumentChunk::new("pf.pdf", "docs/pf.pdf", 1, 0, "Provident fund contribution is twelve percent of basic wages".into()),
        DocumentChunk::new("pf.pdf", "docs/pf.pdf", 2, 0, "Pension scheme share of employer contribution".into()),
        DocumentChunk::new("esi.pdf", "docs/esi.pdf", 1, 0, "Employees state insurance wage ceiling and contribution".into()),
        DocumentChunk::new("bonus.pdf", "docs/bonus.pdf", 1, 0, "Minimum bonus payable under the bonus act".into()),
        DocumentChunk::new("gratuity.pdf", "docs/gratuity.pdf", 3, 0, "Gratuity after five years of continuous service".into()),
    ]
}

#[tokio::test]
async fn build_and_search_index() {
    let tmp = TempDir::new().expect("tmp");
    let index_dir = tmp.path().join("vectorstore");
    let embedder = FakeEmbedder::new(64);
    let chunks = corpus();

    let summary = build_index(&index_dir, TABLE, &embedder, &chunks, 2).await.expect("build");
    assert_eq!(summary.chunk_count, chunks.len());
    assert_eq!(summary.dim, 64);

    let db = open_db(index_dir.to_string_lossy().as_ref()).await.expect("db");
    let meta = read_meta(&db).await.expect("meta").expect("meta present");
    assert_eq!(meta.embedder_id, "fake:xxhash64:d64");
    assert_eq!(meta.dim, 64);
    assert_eq!(meta.chunk_count, 5);

    let store = LanceChunkStore::open(&index_dir, TABLE).await.expect("open");
    let q = embedder.embed_text("gratuity continuous service");
    let hits = store.candidates(&q, 5, None).await.expect("search");
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].chunk.doc_name, "gratuity.pdf");
    assert_eq!(hits[0].chunk.page, 3);
    assert_eq!(hits[0].vector.len(), 64);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let only_pf = store.candidates(&q, 5, Some(&DocFilter::doc("pf.pdf"))).await.expect("filtered");
    assert_eq!(only_pf.len(), 2);
    assert!(only_pf.iter().all(|c| c.chunk.doc_name == "pf.pdf"));
}

#[tokio::test]
async fn rebuild_replaces_previous_index() {
    let tmp = TempDir::new().expect("tmp");
    let index_dir = tmp.path().join("vectorstore");
    let embedder = FakeEmbedder::new(32);
    build_index(&index_dir, TABLE, &embedder, &corpus(), 64).await.expect("first");
    build_index(&index_dir, TABLE, &embedder, &corpus()[..2], 64).await.expect("second");

    let store = LanceChunkStore::open(&index_dir, TABLE).await.expect("open");
    let hits = store.candidates(&embedder.embed_text("bonus"), 10, None).await.expect("search");
    assert_eq!(hits.len(), 2);
}

/// Embedder whose every request fails.
struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    fn embedder_id(&self) -> &str { "failing:d64" }

    fn dim(&self) -> usize { 64 }

    async fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        anyhow::bail!("embedding service unavailable")
    }
}

#[tokio::test]
async fn failed_rebuild_keeps_previous_index() {
    let tmp = TempDir::new().expect("tmp");
    let index_dir = tmp.path().join("vectorstore");
    let embedder = FakeEmbedder::new(64);
    build_index(&index_dir, TABLE, &embedder, &corpus(), 64).await.expect("first");

    let err = build_index(&index_dir, TABLE, &FailingEmbedder, &corpus(), 64).await;
    assert!(err.is_err());

    let store = LanceChunkStore::open(&index_dir, TABLE).await.expect("previous index still opens");
    let hits = store.candidates(&embedder.embed_text("bonus"), 10, None).await.expect("search");
    assert_eq!(hits.len(), 5);
    assert!(!tmp.path().join(".vectorstore.staging").exists());
}

#[tokio::test]
async fn opening_missing_table_fails() {
    let tmp = TempDir::new().expect("tmp");
    assert!(LanceChunkStore::open(tmp.path(), TABLE).await.is_err());
}

/// Store whose filtered searches always fail.
struct FlakyFilterStore {
    chunks: Vec<ScoredChunk>,
    calls: AtomicUsize,
}

#[async_trait]
impl ChunkStore for FlakyFilterStore {
    async fn candidates(&self, _q: &[f32], fetch_k: usize, filter: Option<&DocFilter>) -> anyhow::Result<Vec<ScoredChunk>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if filter.is_some() {
            anyhow::bail!("filter not supported");
        }
        Ok(self.chunks.iter().take(fetch_k).cloned().collect())
    }
}

fn scored(embedder: &FakeEmbedder, chunk: DocumentChunk) -> ScoredChunk {
    let vector = embedder.embed_text(&chunk.text);
    ScoredChunk { chunk, vector, score: 0.0 }
}

#[tokio::test]
async fn retriever_falls_back_to_unfiltered_search() {
    let embedder = Arc::new(FakeEmbedder::new(64));
    let chunks: Vec<ScoredChunk> = corpus().into_iter().map(|c| scored(&embedder, c)).collect();
    let store = Arc::new(FlakyFilterStore { chunks, calls: AtomicUsize::new(0) });
    let settings = RetrievalSettings { k: 3, fetch_k: 5, lambda_mult: 0.5 };
    let retriever = Retriever::new(embedder.clone(), store.clone(), settings);

    let out = retriever.retrieve("bonus act minimum", Some(&DocFilter::doc("bonus.pdf"))).await.expect("retrieve");
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].chunk.doc_name, "bonus.pdf");
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn retriever_returns_at_most_k() {
    let embedder = Arc::new(FakeEmbedder::new(64));
    let chunks: Vec<ScoredChunk> = corpus().into_iter().map(|c| scored(&embedder, c)).collect();
    let store = Arc::new(FlakyFilterStore { chunks, calls: AtomicUsize::new(0) });
    let retriever = Retriever::new(embedder.clone(), store, RetrievalSettings::default());

    let out = retriever.retrieve("provident fund wages", None).await.expect("retrieve");
    assert_eq!(out.len(), 5);
    assert_eq!(out[0].chunk.doc_name, "pf.pdf");
    let q = embedder.embed_query("provident fund wages").await.expect("embed");
    assert!((out[0].score - compliance_vector::mmr::cosine(&q, &out[0].vector)).abs() < 1e-6);
}
