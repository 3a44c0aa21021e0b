//! compliance-embed
//!
//! Embedding providers behind `compliance_core::traits::Embedder`: the
//! OpenAI-compatible remote embedder used in production and a deterministic
//! hashing embedder for tests and offline development.
//!
//! `APP_USE_FAKE_EMBEDDINGS=1` switches `get_default_embedder` to the fake.

pub mod fake;
pub mod remote;

use anyhow::Result;
use tracing::info;

use compliance_core::config::OpenAiSettings;
use compliance_core::traits::Embedder;

pub use fake::FakeEmbedder;
pub use remote::OpenAiEmbedder;

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_embedder(settings: &OpenAiSettings) -> Result<Box<dyn Embedder>> {
    if use_fake_embeddings() {
        info!("Using FakeEmbedder (dim={})", settings.embedding_dim);
        return Ok(Box::new(FakeEmbedder::new(settings.embedding_dim)));
    }
    Ok(Box::new(OpenAiEmbedder::new(settings)?))
}
