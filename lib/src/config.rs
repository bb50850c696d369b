use crate::error::Result;
use crate::import_export::NestingMode;
use crate::query::DEFAULT_SEARCH_ENGINE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_URL: &str = "DOGEAR_API_URL";
pub const ENV_API_TOKEN: &str = "DOGEAR_API_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Host of the search engine queries are compiled against
    #[serde(default = "default_search_engine")]
    pub search_engine: String,

    /// Base URL of the content store API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the content store API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Custom user-agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between opened tab groups
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    #[serde(default)]
    pub nesting: NestingMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_engine: default_search_engine(),
            api_url: default_api_url(),
            api_token: None,
            user_agent: default_user_agent(),
            pacing_delay_ms: default_pacing_delay_ms(),
            nesting: NestingMode::default(),
        }
    }
}

fn default_search_engine() -> String {
    DEFAULT_SEARCH_ENGINE.to_string()
}

fn default_api_url() -> String {
    "http://localhost:1337".to_string()
}

fn default_user_agent() -> String {
    concat!("dogear/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_pacing_delay_ms() -> u64 {
    500
}

impl Config {
    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location (~/.config/dogear/config.yml)
    /// Falls back to defaults if the file is missing or unreadable
    pub fn load() -> Self {
        let config_path = Self::default_path();

        let config = if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load config from {:?}: {}", config_path, e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `DOGEAR_API_URL` / `DOGEAR_API_TOKEN` from `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api_token = Some(token);
        }
        self
    }
}
