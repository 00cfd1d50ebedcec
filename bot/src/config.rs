use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord_token: String,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub scibowldb_base_url: String,
    pub round_base_url: String,
    pub pdf_converter_url: Option<String>,
    pub mapbox_token: Option<String>,
    pub repo_url: Option<String>,
    pub reply_timeout_secs: u64,
    pub override_timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let discord_token = settings
            .get_string("discord.token")
            .or_else(|_| env::var("DISCORD_TOKEN"))
            .map_err(|_| config::ConfigError::NotFound("discord.token".to_string()))?;

        let mongo_uri = settings
            .get_string("database.mongo_uri")
            .or_else(|_| env::var("MONGO_URI"))
            .unwrap_or_else(|_| {
                eprintln!("WARNING: MONGO_URI not set, falling back to localhost");
                "mongodb://localhost:27017".to_string()
            });

        let mongo_database = settings
            .get_string("database.mongo_database")
            .or_else(|_| env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "scibo".to_string());

        let scibowldb_base_url = settings
            .get_string("questions.base_url")
            .or_else(|_| env::var("SCIBOWLDB_BASE_URL"))
            .unwrap_or_else(|_| "https://scibowldb.com".to_string());

        let round_base_url = settings
            .get_string("rounds.base_url")
            .or_else(|_| env::var("ROUND_BASE_URL"))
            .unwrap_or_else(|_| "https://api.adawesome.tech/round".to_string());

        let pdf_converter_url = settings
            .get_string("rounds.pdf_converter_url")
            .or_else(|_| env::var("PDF_CONVERTER_URL"))
            .ok();

        let mapbox_token = settings
            .get_string("iss.mapbox_token")
            .or_else(|_| env::var("MAPBOX_TOKEN"))
            .ok();

        let repo_url = settings
            .get_string("about.repo_url")
            .or_else(|_| env::var("REPO_URL"))
            .ok();

        let reply_timeout_secs = settings
            .get_int("training.reply_timeout_secs")
            .ok()
            .or_else(|| {
                env::var("TRAIN_REPLY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .filter(|v| *v > 0)
            .unwrap_or(120) as u64;

        // The override wait is bounded on purpose; see config/dev.toml for the
        // operator-facing note.
        let override_timeout_secs = settings
            .get_int("training.override_timeout_secs")
            .ok()
            .or_else(|| {
                env::var("TRAIN_OVERRIDE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .filter(|v| *v > 0)
            .unwrap_or(600) as u64;

        Ok(Config {
            discord_token,
            mongo_uri,
            mongo_database,
            scibowldb_base_url,
            round_base_url,
            pdf_converter_url,
            mapbox_token,
            repo_url,
            reply_timeout_secs,
            override_timeout_secs,
        })
    }
}
