use std::sync::Arc;

use dmo_assist::agent::Agent;
use dmo_assist::channels::CliChannel;
use dmo_assist::config::AgentConfig;
use dmo_assist::credentials;
use dmo_assist::export::FileExporter;
use dmo_assist::llm::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AgentConfig::from_env();

    eprintln!("🤖 DMO Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Exports: {}", config.export_dir.display());
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    // Resolve the API key: secrets file → environment → terminal prompt.
    // Without a key the interactive flow is disabled.
    let Some(api_key) = credentials::resolve_api_key(&config.config_dir, true) else {
        eprintln!("⚠️  No API key configured — interactive flow disabled.");
        eprintln!(
            "   Provide one via {}/{} or:",
            config.config_dir.display(),
            credentials::SECRETS_FILE
        );
        eprintln!("   export {}=...", credentials::API_KEY_ENV);
        std::process::exit(1);
    };

    let llm = Arc::new(GeminiClient::new(api_key, &config.model));
    let exporter = Arc::new(FileExporter::new(config.export_dir.clone()));

    let agent = Agent::new(config, exporter, Some(llm));
    agent.run(Box::new(CliChannel::new())).await?;

    Ok(())
}
