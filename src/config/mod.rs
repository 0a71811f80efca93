//! Application configuration loaded from TOML with env-var overrides.
//!
//! ## Loading Order
//!
//! 1. `MUDSCOPE_CONFIG` environment variable (path to TOML file)
//! 2. `mudscope.toml` in the current working directory
//! 3. Built-in defaults
//!
//! After file loading, `GROQ_API_KEY` and `OPENAI_API_KEY` environment
//! variables override the corresponding backend keys, so deployments can keep
//! secrets out of config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            ingest: IngestConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

/// Where the well database lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("mudscope_data")
}

/// Upload guards for LAS ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Reject uploads larger than this many bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    50 * 1024 * 1024
}

/// Generative backend credentials. Either key may be absent; provider choice
/// happens in the backend module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file_chain();
        config.apply_env_overrides();
        config
    }

    fn load_file_chain() -> Self {
        if let Ok(path) = std::env::var("MUDSCOPE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from MUDSCOPE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from MUDSCOPE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "MUDSCOPE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("mudscope.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./mudscope.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./mudscope.toml, using defaults");
                }
            }
        }

        info!("No mudscope.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Environment variables win over file-configured keys.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.trim().is_empty() {
                self.backend.groq_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.backend.openai_api_key = Some(key);
            }
        }
    }
}
