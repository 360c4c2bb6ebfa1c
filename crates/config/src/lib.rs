//! Configuration module for the JLPT tutor backend.

use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Base URL of the local Ollama runtime
    pub ollama_base_url: String,
    /// Model name requested from Ollama for tutor completions
    pub ollama_model: String,
    /// Path to the piper synthesizer binary
    pub piper_binary_path: String,
    /// Path to the piper voice model
    pub piper_model_path: String,
    /// Path to the piper voice model's config JSON
    pub piper_model_config_path: String,
    /// Default seeded value for the `new_cards_per_day` meta entry
    pub new_cards_per_day: u32,
    /// Host to bind the server to
    pub app_host: String,
    /// Port to bind the server to
    pub app_port: u16,
    /// Log level passed through to `tracing_subscriber`'s `EnvFilter`
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let new_cards_per_day = env_var_or("NEW_CARDS_PER_DAY", "20");
        let new_cards_per_day = new_cards_per_day.parse::<u32>().map_err(|_| {
            ConfigError::InvalidValue("NEW_CARDS_PER_DAY".to_string(), new_cards_per_day)
        })?;

        let app_port = env_var_or("APP_PORT", "8080");
        let app_port = app_port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("APP_PORT".to_string(), app_port))?;

        Ok(Self {
            database_url: env_var("DATABASE_URL")?,
            ollama_base_url: env_var_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_model: env_var_or("OLLAMA_MODEL", "llama3.1:70b"),
            piper_binary_path: env_var("PIPER_BINARY_PATH")?,
            piper_model_path: env_var("PIPER_MODEL_PATH")?,
            piper_model_config_path: env_var("PIPER_MODEL_CONFIG_PATH")?,
            new_cards_per_day,
            app_host: env_var_or("APP_HOST", "0.0.0.0"),
            app_port,
            log_level: env_var_or("LOG_LEVEL", "info"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn env_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
