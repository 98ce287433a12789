use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides `api.base_url` when set.
pub const API_URL_ENV: &str = "MOVIE_WISHLIST_API_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Root of the backend, without the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DiscoverConfig {
    /// Query shown when discover is opened without one. The provider has
    /// no "trending" listing, so a fixed search stands in for it.
    #[serde(default = "default_discover_query")]
    pub default_query: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_discover_query() -> String {
    "Avengers".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            default_query: default_discover_query(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults. The API URL
    /// environment override is applied either way.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url;
            }
        }
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("api.base_url cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!("api.base_url must start with http:// or https://: {}", url));
        }
        if self.discover.default_query.trim().is_empty() {
            return Err(anyhow::anyhow!("discover.default_query cannot be empty"));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn api_base_url(&self) -> String {
        self.api.base_url.trim().trim_end_matches('/').to_string()
    }
}
