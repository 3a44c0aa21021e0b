//! Domain types shared by the calculator, the vector index and the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statutory scheme a question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    ProvidentFund,
    Esi,
    Bonus,
    Gratuity,
    ProfessionalTax,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::ProvidentFund => "provident_fund",
            Scheme::Esi => "esi",
            Scheme::Bonus => "bonus",
            Scheme::Gratuity => "gratuity",
            Scheme::ProfessionalTax => "professional_tax",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

fn default_years_of_service() -> i64 { 6 }

/// One compliance question plus the salary context it is asked in.
///
/// Salary figures are monthly rupee amounts. Values are taken as given:
/// nothing here rejects negative or zero inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub question: String,
    pub state: String,
    pub emp_type: String,
    pub basic: f64,
    pub gross: f64,
    #[serde(default = "default_years_of_service")]
    pub years_of_service: i64,
    #[serde(default)]
    pub debug: bool,
}

/// Text of a single PDF page tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub doc_name: String,
    pub source: String,
    /// 1-based page number.
    pub page: u32,
    pub text: String,
}

/// A chunk of a source page that is independently embedded and indexed.
///
/// - `id`: blake3 hash over doc name, page, position and text
/// - `doc_name`: PDF file name, the unit the router filters on
/// - `source`: path the PDF was loaded from
/// - `page`: 1-based page number within the PDF
/// - `chunk_index`: position of the chunk within its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub doc_name: String,
    pub source: String,
    pub page: u32,
    pub chunk_index: usize,
    pub text: String,
}

impl DocumentChunk {
    pub fn new(doc_name: &str, source: &str, page: u32, chunk_index: usize, text: String) -> Self {
        let key = format!("{doc_name}\u{1f}{page}\u{1f}{chunk_index}\u{1f}{text}");
        let id = blake3::hash(key.as_bytes()).to_hex().to_string();
        Self { id, doc_name: doc_name.to_string(), source: source.to_string(), page, chunk_index, text }
    }
}

/// A retrieval candidate: the chunk, its stored vector and cosine similarity
/// to the query vector (higher is better).
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub vector: Vec<f32>,
    pub score: f32,
}

/// Restricts retrieval to chunks of a single source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFilter {
    pub doc_name: String,
}

impl DocFilter {
    pub fn doc(name: impl Into<String>) -> Self { Self { doc_name: name.into() } }
}
