use std::fs;
use tempfile::TempDir;

use compliance_core::data_processor::{ChunkingConfig, DataProcessor, DocumentReport};
use compliance_core::types::PageText;

fn page(doc: &str, page: u32, text: &str) -> PageText {
    PageText { doc_name: doc.to_string(), source: format!("docs/{doc}"), page, text: text.to_string() }
}

#[test]
fn small_page_becomes_one_tagged_chunk() {
    let processor = DataProcessor::new();
    let chunks = processor.chunk_pages(&[page("pf.pdf", 3, "Contribution is 12% of basic wages.")]);

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].doc_name, "pf.pdf");
    assert_eq!(chunks[0].source, "docs/pf.pdf");
    assert_eq!(chunks[0].page, 3);
    assert_eq!(chunks[0].chunk_index, 0);
}

#[test]
fn long_page_is_split_with_overlap() {
    let text = (0..400).map(|i| format!("w{i:04}")).collect::<Vec<_>>().join(" ");
    let processor = DataProcessor::new();
    let chunks = processor.chunk_pages(&[page("esi.pdf", 1, &text)]);

    assert!(chunks.len() > 1, "2400 chars must not fit one 800 char chunk");
    for c in &chunks {
        assert!(c.text.chars().count() <= 800, "chunk too long: {}", c.text.len());
    }
    for pair in chunks.windows(2) {
        let first_word = pair[1].text.split(' ').next().unwrap_or_default();
        assert!(pair[0].text.contains(first_word), "consecutive chunks share an overlap");
    }
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.chunk_index, i);
    }
}

#[test]
fn empty_pages_produce_no_chunks() {
    let processor = DataProcessor::with_config(ChunkingConfig { chunk_size: 200, chunk_overlap: 20 });
    let chunks = processor.chunk_pages(&[page("bonus.pdf", 1, "   "), page("bonus.pdf", 2, "Bonus at 8.33%")]);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].page, 2);
}

#[test]
fn lists_only_top_level_pdfs_sorted() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("pt_ka.pdf"), b"x").unwrap();
    fs::write(dir.join("Bonus.PDF"), b"x").unwrap();
    fs::write(dir.join("notes.txt"), b"x").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("esi.pdf"), b"x").unwrap();

    let files = DataProcessor::new().list_pdf_files(dir);
    let names: Vec<String> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
    assert_eq!(names, vec!["Bonus.PDF".to_string(), "pt_ka.pdf".to_string()]);
}

#[test]
fn empty_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(DataProcessor::new().process_directory(tmp.path()).is_err());
}

#[test]
fn unreadable_pdf_is_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.pdf"), b"not a pdf at all").unwrap();
    let chunks = DataProcessor::new().process_directory(tmp.path()).expect("process");
    assert!(chunks.is_empty());
}

#[test]
fn report_counts_pages_with_text() {
    let long = "x".repeat(60);
    let pages = vec![page("pf.pdf", 1, &long), page("pf.pdf", 2, "short"), page("pf.pdf", 3, "")];
    let report = DocumentReport::from_pages("pf.pdf", &pages);
    assert_eq!(report.pages, 3);
    assert_eq!(report.nonempty_pages, 1);
    assert_eq!(report.total_chars, 65);
}
