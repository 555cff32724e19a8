//! Configuration module

use std::env;
use std::path::PathBuf;

use credlens_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use credlens_core::{ArtifactPaths, EngineConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Trained classifier artifact
    pub model_path: PathBuf,

    /// Fitted scaler artifact
    pub scaler_path: PathBuf,

    /// Retrain after every stored record
    pub auto_retrain: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://reputation.db".to_string()),

            host: env::var("HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),

            scaler_path: env::var("SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCALER_PATH)),

            auto_retrain: env::var("AUTO_RETRAIN")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_path, &self.scaler_path)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_artifacts(self.artifact_paths())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
