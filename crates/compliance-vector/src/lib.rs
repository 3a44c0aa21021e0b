//! compliance-vector
//!
//! LanceDB-backed vector index for statute chunks: schema, writer used by
//! ingestion, filtered candidate search, maximum-marginal-relevance
//! selection and the `Retriever` that ties them to an embedder.

pub mod ingest;
pub mod mmr;
pub mod retriever;
pub mod schema;
pub mod store;
pub mod table;
pub mod writer;

pub use ingest::{build_index, IndexSummary};
pub use retriever::Retriever;
pub use store::LanceChunkStore;
pub use table::IndexMeta;
pub use writer::LanceChunkWriter;
