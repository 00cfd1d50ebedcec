use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scibo_bot::{bot, config::Config, services::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scibo_bot=debug,serenity=warn,poise=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Science Bowl practice bot");

    // Load configuration
    let config = Config::load()?;

    // Initialize database connection
    let mongo_client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;

    let state = Arc::new(AppState::new(config, mongo_client).await?);

    // Connect to the gateway and serve events until shutdown
    let mut client = bot::create_client(state).await?;
    client.start().await?;

    Ok(())
}
