use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use compliance_core::config::expand_path;
use compliance_core::data_processor::{ChunkingConfig, DataProcessor};
use compliance_embed::get_default_embedder;
use compliance_vector::build_index;

/// Rebuild the vector index from the statute PDFs.
#[derive(Parser)]
#[command(name = "compliance-ingest", version)]
struct Cli {
    /// Directory holding the PDFs (defaults to data.docs_dir)
    #[arg(long)]
    docs: Option<String>,

    /// Index directory to (re)create (defaults to data.index_dir)
    #[arg(long)]
    index: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    compliance_cli::init_tracing(cli.verbose);
    let settings = compliance_cli::load_settings()?;

    let docs_dir: PathBuf = cli.docs.as_deref().map_or_else(|| settings.data.docs_path(), expand_path);
    let index_dir: PathBuf = cli.index.as_deref().map_or_else(|| settings.data.index_path(), expand_path);
    info!(docs = %docs_dir.display(), index = %index_dir.display(), "starting ingestion");

    let processor = DataProcessor::with_config(ChunkingConfig {
        chunk_size: settings.chunking.chunk_size,
        chunk_overlap: settings.chunking.chunk_overlap,
    });
    let chunks = processor.process_directory(&docs_dir)?;
    info!("Chunks created: {}", chunks.len());

    let embedder = get_default_embedder(&settings.openai)?;
    let summary = build_index(&index_dir, &settings.data.table, embedder.as_ref(), &chunks, settings.chunking.embed_batch_size).await?;

    println!("\n✅ Index built: {} chunks embedded with {} (dim {})", summary.chunk_count, summary.embedder_id, summary.dim);
    println!("📁 {}", index_dir.display());
    Ok(())
}
