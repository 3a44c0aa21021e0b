use anyhow::Result;
use clap::Parser;

use compliance_core::config::expand_path;
use compliance_core::data_processor::{DataProcessor, DocumentReport, NONEMPTY_PAGE_CHARS};

const SAMPLES: usize = 5;
const PREVIEW_CHARS: usize = 300;

/// Report how much text can be extracted from each PDF.
#[derive(Parser)]
#[command(name = "compliance-check-docs", version)]
struct Cli {
    /// Directory holding the PDFs (defaults to data.docs_dir)
    #[arg(long)]
    docs: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    compliance_cli::init_tracing(false);
    let settings = compliance_cli::load_settings()?;
    let docs_dir = cli.docs.as_deref().map_or_else(|| settings.data.docs_path(), expand_path);

    let processor = DataProcessor::new();
    let mut reports = Vec::new();
    let mut samples = Vec::new();
    for path in processor.list_pdf_files(&docs_dir) {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let pages = match processor.load_pages(&path) {
            Ok(p) => p,
            Err(e) => {
                println!("⚠️  {name}: {e}");
                continue;
            }
        };
        for p in &pages {
            let text = p.text.trim();
            if text.chars().count() > NONEMPTY_PAGE_CHARS && samples.len() < SAMPLES {
                let preview: String = text.chars().take(PREVIEW_CHARS).collect();
                samples.push((name.clone(), text.chars().count(), preview.replace('\n', " ")));
            }
        }
        reports.push(DocumentReport::from_pages(&name, &pages));
    }

    println!("{:<28} {:>6} {:>10} {:>10}", "FILE", "PAGES", "NON-EMPTY", "CHARS");
    for r in &reports {
        println!("{:<28} {:>6} {:>10} {:>10}", r.doc_name, r.pages, r.nonempty_pages, r.total_chars);
    }
    println!("\nTotal pages: {}", reports.iter().map(|r| r.pages).sum::<usize>());
    println!("Non-empty pages (>{NONEMPTY_PAGE_CHARS} chars): {}", reports.iter().map(|r| r.nonempty_pages).sum::<usize>());
    println!("\n--- Samples ---");
    for (file, len, preview) in samples {
        println!("\nFILE: {file} LEN: {len}");
        println!("{preview}");
    }
    Ok(())
}
