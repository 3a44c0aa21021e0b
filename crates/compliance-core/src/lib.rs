//! compliance-core
//!
//! Shared domain types, configuration, error type and the trait seams
//! (`Embedder`, `ChunkStore`, `ChatModel`) used by the retrieval and answer
//! pipeline. Also owns PDF page loading and chunking for ingestion.

pub mod config;
pub mod data_processor;
pub mod error;
pub mod splitter;
pub mod traits;
pub mod types;

pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use types::{DocFilter, DocumentChunk, PageText, Query, Scheme, ScoredChunk};
