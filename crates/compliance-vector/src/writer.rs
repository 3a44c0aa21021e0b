use anyhow::{anyhow, Result};
use arrow_array::{FixedSizeListArray, Int32Array, RecordBatch, RecordBatchIterator, StringArray};
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::Connection;
use std::sync::Arc;
use tracing::info;

use compliance_core::error::Error;
use compliance_core::types::DocumentChunk;

use crate::schema::build_chunk_schema;
use crate::table::table_exists;

const WRITE_BATCH: usize = 1000;

/// Appends embedded chunks to the chunk table, creating it on first write.
pub struct LanceChunkWriter {
	db: Connection,
	table_name: String,
	dim: usize,
}

impl LanceChunkWriter {
	pub fn new(db: Connection, table_name: &str, dim: usize) -> Self {
		Self { db, table_name: table_name.to_string(), dim }
	}

	pub async fn write(&self, chunks: &[DocumentChunk], embeddings: &[Vec<f32>]) -> Result<usize> {
		if chunks.is_empty() { info!("No chunks to index"); return Ok(0); }
		if chunks.len() != embeddings.len() {
			return Err(anyhow!("{} chunks but {} embeddings", chunks.len(), embeddings.len()));
		}
		if let Some(bad) = embeddings.iter().find(|v| v.len() != self.dim) {
			return Err(Error::DimensionMismatch { got: bad.len(), expected: self.dim }.into());
		}
		info!("Writing {} chunks into LanceDB table: {}", chunks.len(), self.table_name);
		let pb = ProgressBar::new(chunks.len() as u64);
		pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks written")?.progress_chars("#>-"));
		let mut written = 0usize;
		for (chunk_batch, vector_batch) in chunks.chunks(WRITE_BATCH).zip(embeddings.chunks(WRITE_BATCH)) {
			self.insert_batch(chunk_batch, vector_batch).await?;
			written += chunk_batch.len();
			pb.set_position(written as u64);
		}
		pb.finish_and_clear();
		info!("Indexed {} chunks into LanceDB", written);
		Ok(written)
	}

	async fn insert_batch(&self, chunks: &[DocumentChunk], vectors: &[Vec<f32>]) -> Result<()> {
		let record_batch = self.to_record_batch(chunks, vectors)?;
		let schema = record_batch.schema();
		let reader = Box::new(RecordBatchIterator::new(vec![Ok(record_batch)].into_iter(), schema));
		if table_exists(&self.db, &self.table_name).await? {
			self.db.open_table(&self.table_name).execute().await?.add(reader).execute().await?;
		} else {
			self.db.create_table(&self.table_name, reader).execute().await?;
		}
		Ok(())
	}

	fn to_record_batch(&self, chunks: &[DocumentChunk], vectors: &[Vec<f32>]) -> Result<RecordBatch> {
		let dim = i32::try_from(self.dim)?;
		let schema = build_chunk_schema(dim);
		let mut pages = Vec::with_capacity(chunks.len());
		let mut chunk_indices = Vec::with_capacity(chunks.len());
		for c in chunks {
			pages.push(i32::try_from(c.page)?);
			chunk_indices.push(i32::try_from(c.chunk_index)?);
		}
		let vectors = vectors.iter().map(|v| Some(v.iter().map(|&x| Some(x)).collect::<Vec<_>>()));
		let record_batch = RecordBatch::try_new(schema, vec![
			Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.id.as_str()))),
			Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.doc_name.as_str()))),
			Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.source.as_str()))),
			Arc::new(Int32Array::from(pages)),
			Arc::new(Int32Array::from(chunk_indices)),
			Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.text.as_str()))),
			Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(vectors, dim)),
		])?;
		Ok(record_batch)
	}
}
