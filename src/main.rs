use std::sync::Arc;

use alloy::providers::ProviderBuilder;
use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::{filter, prelude::*};
use v3swap::{
    bootstrap,
    client::AlloyClient,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Set up tracing
    let filter = filter::Targets::new()
        .with_target("v3swap", Level::INFO);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        error!("Error during swap: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&path)?.validate()?;

    info!("Connecting to {}", config.rpc_url);
    let provider = Arc::new(
        ProviderBuilder::new()
            .connect(config.rpc_url.as_str())
            .await?
    );
    let client = Arc::new(AlloyClient::new(provider));

    bootstrap::run(client, config.signer.clone(), &config).await?;
    Ok(())
}
