use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use compliance_rag::Copilot;

/// Serve `POST /ask` over the built index.
#[derive(Parser)]
#[command(name = "compliance-server", version)]
struct Cli {
    /// Listen address, overrides server.host/server.port
    #[arg(long)]
    bind: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    compliance_cli::init_tracing(cli.verbose);
    let settings = compliance_cli::load_settings()?;

    let copilot = Arc::new(Copilot::from_settings(&settings).await?);
    info!(model = copilot.model_name(), "copilot ready");

    let addr = cli.bind.unwrap_or_else(|| settings.server.bind_addr());
    compliance_gateway::serve(&addr, copilot).await
}
