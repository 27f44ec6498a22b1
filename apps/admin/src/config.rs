//! Admin app configuration.
//!
//! Three layers, strongest first: environment variables, then the user's
//! `config.toml`, then built-in defaults. The file lives in the platform
//! config directory (e.g. `~/.config/kirana-pos/config.toml` on Linux).

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Runtime configuration for the admin client.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the backend REST API.
    pub backend_url: String,
    /// Delay before a search keystroke triggers a server fetch.
    pub search_debounce_ms: u64,
}

/// On-disk shape. Everything optional so a partial file still loads.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    backend_url: Option<String>,
    search_debounce_ms: Option<u64>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AdminConfig {
    /// Loads configuration: env > config.toml > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = AdminConfig::default();

        if let Some(path) = Self::config_path() {
            if let Ok(raw) = fs::read_to_string(&path) {
                let file: ConfigFile = toml::from_str(&raw)
                    .map_err(|e| ConfigError::Parse(path.clone(), e.to_string()))?;
                if let Some(url) = file.backend_url {
                    config.backend_url = url;
                }
                if let Some(ms) = file.search_debounce_ms {
                    config.search_debounce_ms = ms;
                }
                debug!(path = %path.display(), "Loaded config file");
            }
        }

        if let Ok(url) = std::env::var("KIRANA_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Ok(ms) = std::env::var("KIRANA_SEARCH_DEBOUNCE_MS") {
            config.search_debounce_ms = ms
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KIRANA_SEARCH_DEBOUNCE_MS".to_string()))?;
        }

        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "kirana", "pos").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, String),
}
