//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nesting, e.g. `APP_SERVER__PORT=9000`). Every setting has a
//! default, so a missing config file still yields a usable `Settings`.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Ok(Self { figment })
    }

    /// Wrap an already assembled figment (used by tests and embedding callers).
    pub fn from_figment(figment: Figment) -> Self { Self { figment } }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.documents = settings.documents.with_uppercase_states();
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub openai: OpenAiSettings,
    pub documents: DocumentCatalog,
}

impl Settings {
    fn validate(&self) -> crate::error::Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunking.chunk_size must be > 0".into()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.k == 0 || self.retrieval.fetch_k < self.retrieval.k {
            return Err(Error::InvalidConfig("retrieval.fetch_k must be >= k and k > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.retrieval.lambda_mult) {
            return Err(Error::InvalidConfig("retrieval.lambda_mult must be within [0, 1]".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self { Self { host: "127.0.0.1".into(), port: 8000 } }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub docs_dir: String,
    pub index_dir: String,
    pub table: String,
}

impl Default for DataSettings {
    fn default() -> Self { Self { docs_dir: "docs".into(), index_dir: "vectorstore".into(), table: "chunks".into() } }
}

impl DataSettings {
    pub fn docs_path(&self) -> PathBuf { expand_path(&self.docs_dir) }
    pub fn index_path(&self) -> PathBuf { expand_path(&self.index_dir) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    pub embed_batch_size: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self { Self { chunk_size: 800, chunk_overlap: 100, embed_batch_size: 64 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub k: usize,
    pub fetch_k: usize,
    /// MMR trade-off: 1.0 is pure relevance, 0.0 pure diversity.
    pub lambda_mult: f32,
}

impl Default for RetrievalSettings {
    fn default() -> Self { Self { k: 5, fetch_k: 20, lambda_mult: 0.5 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub embedding_dim: usize,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key: String::new(),
            chat_model: "gpt-4.1-mini".into(),
            embedding_model: "text-embedding-ada-002".into(),
            embedding_dim: 1536,
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

impl OpenAiSettings {
    /// `openai.api_key` if set, otherwise `OPENAI_API_KEY`, otherwise empty.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        env::var("OPENAI_API_KEY").unwrap_or_default()
    }
}

/// File names of the statutory PDFs in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentCatalog {
    pub provident_fund: String,
    pub esi: String,
    pub bonus: String,
    pub gratuity: String,
    /// Upper-case state code → professional tax PDF.
    pub professional_tax: BTreeMap<String, String>,
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        let professional_tax = [("KA", "pt_ka.pdf"), ("MH", "pt_mh.pdf"), ("TN", "pt_tn.pdf")]
            .into_iter()
            .map(|(state, doc)| (state.to_string(), doc.to_string()))
            .collect();
        Self {
            provident_fund: "pf.pdf".into(),
            esi: "esi.pdf".into(),
            bonus: "bonus.pdf".into(),
            gratuity: "gratuity.pdf".into(),
            professional_tax,
        }
    }
}

impl DocumentCatalog {
    /// Re-key the professional tax map by upper-case state code. Environment
    /// overrides arrive lower-cased (`APP_DOCUMENTS__PROFESSIONAL_TAX__GJ` is `gj`).
    pub fn with_uppercase_states(mut self) -> Self {
        self.professional_tax = std::mem::take(&mut self.professional_tax)
            .into_iter()
            .map(|(state, doc)| (state.trim().to_uppercase(), doc))
            .collect();
        self
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
