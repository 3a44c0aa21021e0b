use anyhow::Result;
use clap::Parser;

use compliance_core::traits::ChatModel;
use compliance_rag::OpenAiChat;

/// Check chat credentials with a one-line prompt.
#[derive(Parser)]
#[command(name = "compliance-ping", version)]
struct Cli {
    #[arg(long, default_value = "Say hello")]
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    compliance_cli::init_tracing(false);
    let settings = compliance_cli::load_settings()?;

    let chat = OpenAiChat::new(&settings.openai)?;
    println!("KEY PREFIX: {}", chat.masked_key());
    println!("MODEL: {}", chat.model_name());
    let reply = chat.complete(&cli.prompt).await?;
    println!("Response: {reply}");
    Ok(())
}
