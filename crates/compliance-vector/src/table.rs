//! LanceDB connection and housekeeping helpers.
//!
//! Provides the database open function and a small key/value `meta` table
//! recording how the index was built (embedder, dimension, size, time).
use anyhow::{anyhow, Result};
use arrow_array::{RecordBatch, RecordBatchIterator, StringArray};
use chrono::Utc;
use futures::TryStreamExt;
use lancedb::query::ExecutableQuery;
use lancedb::{connect, Connection};
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::build_meta_schema;

pub const META_TABLE: &str = "meta";

pub async fn open_db(uri: &str) -> Result<Connection> {
    Ok(connect(uri).execute().await?)
}

pub async fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    Ok(conn.table_names().execute().await?.iter().any(|n| n == name))
}

/// Build parameters recorded next to the chunk table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMeta {
    pub embedder_id: String,
    pub dim: usize,
    pub chunk_count: usize,
    pub built_at: String,
}

impl IndexMeta {
    pub fn now(embedder_id: &str, dim: usize, chunk_count: usize) -> Self {
        Self { embedder_id: embedder_id.to_string(), dim, chunk_count, built_at: Utc::now().to_rfc3339() }
    }
}

pub async fn write_meta(conn: &Connection, meta: &IndexMeta) -> Result<()> {
    let entries = [
        ("embedder_id", meta.embedder_id.clone()),
        ("dim", meta.dim.to_string()),
        ("chunk_count", meta.chunk_count.to_string()),
        ("built_at", meta.built_at.clone()),
    ];
    let schema = build_meta_schema();
    let rb = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(entries.iter().map(|(k, _)| k.to_string()).collect::<Vec<_>>())),
            Arc::new(StringArray::from(entries.iter().map(|(_, v)| v.clone()).collect::<Vec<_>>())),
        ],
    )?;
    let reader = Box::new(RecordBatchIterator::new(vec![Ok(rb)].into_iter(), schema.clone()));
    if !table_exists(conn, META_TABLE).await? {
        let empty = RecordBatchIterator::new(vec![].into_iter(), schema);
        conn.create_table(META_TABLE, Box::new(empty)).execute().await?;
    }
    let t = conn.open_table(META_TABLE).execute().await?;
    // Upsert: key is unique
    let mut mi = t.merge_insert(&["key"]);
    mi.when_matched_update_all(None).when_not_matched_insert_all();
    mi.execute(reader).await?;
    Ok(())
}

pub async fn read_meta(conn: &Connection) -> Result<Option<IndexMeta>> {
    if !table_exists(conn, META_TABLE).await? {
        return Ok(None);
    }
    let t = conn.open_table(META_TABLE).execute().await?;
    let mut values = HashMap::new();
    let mut stream = t.query().execute().await?;
    while let Some(batch) = stream.try_next().await? {
        let keys = batch.column_by_name("key").and_then(|c| c.as_any().downcast_ref::<StringArray>()).ok_or_else(|| anyhow!("meta.key column missing"))?;
        let vals = batch.column_by_name("value").and_then(|c| c.as_any().downcast_ref::<StringArray>()).ok_or_else(|| anyhow!("meta.value column missing"))?;
        for i in 0..batch.num_rows() {
            values.insert(keys.value(i).to_string(), vals.value(i).to_string());
        }
    }
    let get = |k: &str| values.get(k).cloned().ok_or_else(|| anyhow!("meta key '{}' missing", k));
    Ok(Some(IndexMeta {
        embedder_id: get("embedder_id")?,
        dim: get("dim")?.parse()?,
        chunk_count: get("chunk_count")?.parse()?,
        built_at: get("built_at")?,
    }))
}
