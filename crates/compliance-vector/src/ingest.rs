//! Full index rebuild: embed every chunk and persist it with build metadata.
use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use compliance_core::traits::Embedder;
use compliance_core::types::DocumentChunk;

use crate::table::{open_db, write_meta, IndexMeta};
use crate::writer::LanceChunkWriter;

#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub chunk_count: usize,
    pub embedder_id: String,
    pub dim: usize,
}

/// Replace whatever lives in `index_dir` with a fresh index of `chunks`.
///
/// Embedding happens in `batch_size` slices so one failed request does not
/// hold the whole corpus in flight. The new index is written to a sibling
/// staging directory and renamed into place only once it is complete, so a
/// failed rebuild leaves the previous index untouched.
pub async fn build_index(
    index_dir: &Path,
    table: &str,
    embedder: &dyn Embedder,
    chunks: &[DocumentChunk],
    batch_size: usize,
) -> Result<IndexSummary> {
    if chunks.is_empty() {
        return Err(anyhow!("no chunks to index"));
    }
    let batch_size = batch_size.max(1);
    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks embedded")?
            .progress_chars("#>-"),
    );
    let mut embeddings = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(batch_size) {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(anyhow!("embedder returned {} vectors for {} texts", vectors.len(), texts.len()));
        }
        embeddings.extend(vectors);
        pb.inc(batch.len() as u64);
    }
    pb.finish_and_clear();

    let staging = staging_dir(index_dir)?;
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;
    let written = match write_index(&staging, table, embedder, chunks, &embeddings).await {
        Ok(written) => written,
        Err(e) => {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
    };

    if index_dir.exists() {
        fs::remove_dir_all(index_dir)?;
    }
    fs::rename(&staging, index_dir)?;
    info!(chunks = written, embedder = embedder.embedder_id(), index = %index_dir.display(), "index built");

    Ok(IndexSummary { chunk_count: written, embedder_id: embedder.embedder_id().to_string(), dim: embedder.dim() })
}

async fn write_index(
    dir: &Path,
    table: &str,
    embedder: &dyn Embedder,
    chunks: &[DocumentChunk],
    embeddings: &[Vec<f32>],
) -> Result<usize> {
    let db = open_db(dir.to_string_lossy().as_ref()).await?;
    let writer = LanceChunkWriter::new(db.clone(), table, embedder.dim());
    let written = writer.write(chunks, embeddings).await?;
    write_meta(&db, &IndexMeta::now(embedder.embedder_id(), embedder.dim(), written)).await?;
    Ok(written)
}

/// `vectorstore` -> `.vectorstore.staging` in the same parent directory.
fn staging_dir(index_dir: &Path) -> Result<PathBuf> {
    let name = index_dir
        .file_name()
        .ok_or_else(|| anyhow!("index path {} has no directory name", index_dir.display()))?;
    Ok(index_dir.with_file_name(format!(".{}.staging", name.to_string_lossy())))
}
