use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Error;
use crate::splitter::RecursiveCharacterSplitter;
use crate::types::{DocumentChunk, PageText};

/// Pages with more trimmed characters than this count as carrying text.
pub const NONEMPTY_PAGE_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 800, chunk_overlap: 100 }
    }
}

/// Per-file text statistics for corpus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub doc_name: String,
    pub pages: usize,
    pub nonempty_pages: usize,
    pub total_chars: usize,
}

impl DocumentReport {
    pub fn from_pages(doc_name: &str, pages: &[PageText]) -> Self {
        let trimmed_lens: Vec<usize> = pages.iter().map(|p| p.text.trim().chars().count()).collect();
        Self {
            doc_name: doc_name.to_string(),
            pages: pages.len(),
            nonempty_pages: trimmed_lens.iter().filter(|&&n| n > NONEMPTY_PAGE_CHARS).count(),
            total_chars: trimmed_lens.iter().sum(),
        }
    }
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(chunking_config: ChunkingConfig) -> Self { Self { chunking_config } }

    /// Load every PDF in `docs_dir`, tag pages with their file name and split
    /// them into chunks. PDFs that fail to parse are skipped with a warning.
    pub fn process_directory(&self, docs_dir: &Path) -> Result<Vec<DocumentChunk>> {
        let files = self.list_pdf_files(docs_dir);
        if files.is_empty() {
            return Err(Error::NotFound(format!("no .pdf files under {}", docs_dir.display())).into());
        }
        let mut all_pages = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            info!("Loading file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            match self.load_pages(file_path) {
                Ok(pages) => all_pages.extend(pages),
                Err(e) => warn!("Skipping {}: {}", file_path.display(), e),
            }
        }
        info!("Total pages loaded: {}", all_pages.len());
        let chunks = self.chunk_pages(&all_pages);
        info!("Processed {} files into {} chunks", files.len(), chunks.len());
        Ok(chunks)
    }

    /// Extract the text of each page of a PDF. A page whose text cannot be
    /// extracted is kept with empty text so page numbering stays intact.
    pub fn load_pages(&self, file_path: &Path) -> Result<Vec<PageText>> {
        let doc_name = file_name(file_path);
        let source = file_path.to_string_lossy().to_string();
        let document = lopdf::Document::load(file_path)
            .map_err(|e| Error::Pdf { path: source.clone(), message: e.to_string() })?;
        let mut pages = Vec::new();
        for page in document.get_pages().into_keys() {
            let text = document.extract_text(&[page]).unwrap_or_else(|e| {
                warn!("{}: no text on page {}: {}", doc_name, page, e);
                String::new()
            });
            pages.push(PageText { doc_name: doc_name.clone(), source: source.clone(), page, text });
        }
        Ok(pages)
    }

    pub fn chunk_pages(&self, pages: &[PageText]) -> Vec<DocumentChunk> {
        let splitter = RecursiveCharacterSplitter::new(self.chunking_config.chunk_size, self.chunking_config.chunk_overlap);
        let mut chunks = Vec::new();
        for page in pages {
            for (chunk_index, text) in splitter.split_text(&page.text).into_iter().enumerate() {
                chunks.push(DocumentChunk::new(&page.doc_name, &page.source, page.page, chunk_index, text));
            }
        }
        chunks
    }

    /// PDF files directly inside `root`, sorted by file name.
    pub fn list_pdf_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut pdf_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("pdf")))
            .collect();
        pdf_files.sort();
        pdf_files
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| path.to_string_lossy().to_string())
}
