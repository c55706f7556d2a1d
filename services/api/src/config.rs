//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which medium backs the complaint store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// A single JSON array file.
    Json { path: PathBuf },
    /// An SQLite database reached through `sqlx`.
    Sqlite { database_url: String },
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub store: StoreBackend,
    pub uploads_dir: PathBuf,
    pub cors_origin: String,
    pub groq_api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // --- Server Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:3000");
        let uploads_dir = PathBuf::from(var_or("UPLOADS_DIR", "./uploads"));

        // --- Storage Settings ---
        let store = match var_or("STORE_BACKEND", "json").to_lowercase().as_str() {
            "json" => StoreBackend::Json {
                path: PathBuf::from(var_or("STORE_PATH", "./data/complaints.json")),
            },
            "sqlite" => StoreBackend::Sqlite {
                database_url: var_or("DATABASE_URL", "sqlite://data/complaints.db?mode=rwc"),
            },
            other => {
                return Err(ConfigError::InvalidValue(
                    "STORE_BACKEND".to_string(),
                    format!("'{}' is not one of json, sqlite", other),
                ))
            }
        };

        // --- Completion Service Settings ---
        // The key stays optional: without it every letter comes from the template path.
        let groq_api_key = lookup("GROQ_API_KEY");
        let ai_base_url = var_or("AI_BASE_URL", "https://api.groq.com/openai/v1");
        let ai_model = var_or("AI_MODEL", "llama-3.3-70b-versatile");
        let timeout_str = var_or("AI_TIMEOUT_SECS", "30");
        let ai_timeout = match timeout_str.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "AI_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ))
            }
        };

        Ok(Self {
            bind_address,
            log_level,
            store,
            uploads_dir,
            cors_origin,
            groq_api_key,
            ai_base_url,
            ai_model,
            ai_timeout,
        })
    }
}
