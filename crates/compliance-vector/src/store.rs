use anyhow::{anyhow, Result};
use arrow_array::cast::AsArray;
use arrow_array::{Array, FixedSizeListArray, Int32Array, RecordBatch, StringArray};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, DistanceType};
use std::path::Path;
use tracing::debug;

use compliance_core::traits::ChunkStore;
use compliance_core::types::{DocFilter, DocumentChunk, ScoredChunk};

use crate::mmr::cosine;
use crate::table::{open_db, table_exists};

/// Read side of the chunk table: nearest-neighbour candidates for a query vector.
pub struct LanceChunkStore {
	db: Connection,
	table_name: String,
}

impl LanceChunkStore {
	pub fn new(db: Connection, table_name: &str) -> Self {
		Self { db, table_name: table_name.to_string() }
	}

	/// Open an existing index directory. Fails when the chunk table was never built.
	pub async fn open(index_dir: &Path, table_name: &str) -> Result<Self> {
		let db = open_db(index_dir.to_string_lossy().as_ref()).await?;
		if !table_exists(&db, table_name).await? {
			return Err(anyhow!("table '{}' not found in {}; run the ingestion step first", table_name, index_dir.display()));
		}
		Ok(Self::new(db, table_name))
	}

	pub fn connection(&self) -> &Connection { &self.db }
}

fn doc_name_predicate(filter: &DocFilter) -> String {
	format!("doc_name = '{}'", filter.doc_name.replace('\'', "''"))
}

fn string_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
	batch.column_by_name(name).and_then(|c| c.as_any().downcast_ref::<StringArray>()).ok_or_else(|| anyhow!("missing {} column", name))
}

fn int_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int32Array> {
	batch.column_by_name(name).and_then(|c| c.as_any().downcast_ref::<Int32Array>()).ok_or_else(|| anyhow!("missing {} column", name))
}

fn batch_to_chunks(batch: &RecordBatch, query_vec: &[f32], out: &mut Vec<ScoredChunk>) -> Result<()> {
	let ids = string_col(batch, "id")?;
	let doc_names = string_col(batch, "doc_name")?;
	let sources = string_col(batch, "source")?;
	let texts = string_col(batch, "text")?;
	let pages = int_col(batch, "page")?;
	let chunk_indices = int_col(batch, "chunk_index")?;
	let vectors = batch.column_by_name("vector").and_then(|c| c.as_any().downcast_ref::<FixedSizeListArray>()).ok_or_else(|| anyhow!("missing vector column"))?;
	for i in 0..batch.num_rows() {
		if !vectors.is_valid(i) { continue; }
		let vector = vectors.value(i).as_primitive::<arrow_array::types::Float32Type>().values().to_vec();
		let chunk = DocumentChunk {
			id: ids.value(i).to_string(),
			doc_name: doc_names.value(i).to_string(),
			source: sources.value(i).to_string(),
			page: u32::try_from(pages.value(i))?,
			chunk_index: usize::try_from(chunk_indices.value(i))?,
			text: texts.value(i).to_string(),
		};
		let score = cosine(query_vec, &vector);
		out.push(ScoredChunk { chunk, vector, score });
	}
	Ok(())
}

#[async_trait]
impl ChunkStore for LanceChunkStore {
	async fn candidates(&self, query_vec: &[f32], fetch_k: usize, filter: Option<&DocFilter>) -> Result<Vec<ScoredChunk>> {
		let table = self.db.open_table(&self.table_name).execute().await?;
		let mut query = table.vector_search(query_vec.to_vec())?.distance_type(DistanceType::Cosine).limit(fetch_k);
		if let Some(f) = filter {
			query = query.only_if(doc_name_predicate(f));
		}
		let mut stream = query.execute().await?;
		let mut out = Vec::with_capacity(fetch_k);
		while let Some(batch) = stream.try_next().await? {
			batch_to_chunks(&batch, query_vec, &mut out)?;
		}
		out.sort_by(|a, b| b.score.total_cmp(&a.score));
		debug!(candidates = out.len(), filter = ?filter.map(|f| f.doc_name.as_str()), "vector search");
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn predicate_escapes_quotes() {
		assert_eq!(doc_name_predicate(&DocFilter::doc("pf.pdf")), "doc_name = 'pf.pdf'");
		assert_eq!(doc_name_predicate(&DocFilter::doc("o'neil.pdf")), "doc_name = 'o''neil.pdf'");
	}
}
