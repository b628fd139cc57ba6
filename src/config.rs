// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! All values are read once at startup; nothing here is re-read while the
//! process is serving.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// Path to the quantized classifier artifact (ONNX)
    pub model_path: String,
    /// JWT signing key for bearer tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Bearer token lifetime in minutes
    pub token_expiry_minutes: u64,
    /// Audit entries older than this many minutes are swept
    pub log_retention_minutes: u64,
    /// Interval between retention sweeps, in seconds
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SIGNING_KEY` and `MODEL_PATH` are required; everything else has
    /// a development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/pulmoscan.db".to_string()),
            model_path: env::var("MODEL_PATH").map_err(|_| ConfigError::Missing("MODEL_PATH"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            token_expiry_minutes: env::var("TOKEN_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            log_retention_minutes: env::var("LOG_RETENTION_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
        })
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            model_path: "models/lung-classifier.onnx".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            token_expiry_minutes: 30,
            log_retention_minutes: 60,
            sweep_interval_secs: 3600,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
