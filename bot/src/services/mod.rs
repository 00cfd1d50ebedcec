use crate::config::Config;
use mongodb::{bson::doc, Client as MongoClient, Database};

/// Long-lived process context: configuration, the Mongo database handle, and
/// one shared HTTP client. Built once in `main` and passed into every command
/// through the framework data slot; nothing else owns connection lifecycle.
pub struct AppState {
    pub config: Config,
    pub mongo: Database,
    pub http: reqwest::Client,
}

impl AppState {
    pub async fn new(config: Config, mongo_client: MongoClient) -> anyhow::Result<Self> {
        let mongo = mongo_client.database(&config.mongo_database);

        tracing::info!("Pinging MongoDB...");
        tokio::time::timeout(
            std::time::Duration::from_secs(30),
            mongo.run_command(doc! { "ping": 1 }),
        )
        .await
        .map_err(|_| anyhow::anyhow!("MongoDB ping timeout after 30s"))??;
        tracing::info!("MongoDB connection established successfully");

        Ok(Self {
            config,
            mongo,
            http: reqwest::Client::new(),
        })
    }
}

pub mod iss_service;
pub mod question_service;
pub mod round_service;
pub mod score_service;
pub mod training_service;
