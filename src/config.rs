//! TOML configuration.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below, so an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [api]
//! endpoint = "https://hn.algolia.com/api/v1/search"
//! tags = "front_page"
//! hits_per_page = 100
//! # timeout_secs = 10
//!
//! [view]
//! skeleton_count = 5
//! heading = "Hacker News Top Stories"
//!
//! [cache]
//! ttl_secs = 300
//!
//! [server]
//! bind = "127.0.0.1:7340"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
    /// Used by `hnf serve` only.
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where and how the front page is requested.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Search endpoint, without query string.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sent as `tags=`.
    #[serde(default = "default_tags")]
    pub tags: String,
    /// Sent as `hitsPerPage=`; must be at least 1.
    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: u32,
    /// Unset means the request may take as long as the server does.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            tags: default_tags(),
            hits_per_page: default_hits_per_page(),
            timeout_secs: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://hn.algolia.com/api/v1/search".to_string()
}
fn default_tags() -> String {
    "front_page".to_string()
}
fn default_hits_per_page() -> u32 {
    100
}

/// Fixed parts of the rendered page.
#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    /// Placeholder cards shown while loading.
    #[serde(default = "default_skeleton_count")]
    pub skeleton_count: usize,
    #[serde(default = "default_heading")]
    pub heading: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            skeleton_count: default_skeleton_count(),
            heading: default_heading(),
        }
    }
}

fn default_skeleton_count() -> usize {
    5
}
fn default_heading() -> String {
    "Hacker News Top Stories".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Age after which a successful fetch is refreshed in the background.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// Built-in defaults, used when no `--config` is given.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.api.endpoint.starts_with("http://") || self.api.endpoint.starts_with("https://"))
        {
            anyhow::bail!(
                "api.endpoint must be an http(s) URL, got '{}'",
                self.api.endpoint
            );
        }

        if !(1..=1000).contains(&self.api.hits_per_page) {
            anyhow::bail!("api.hits_per_page must be in [1, 1000]");
        }

        if self.api.timeout_secs == Some(0) {
            anyhow::bail!("api.timeout_secs must be > 0 when set");
        }

        if self.view.skeleton_count == 0 {
            anyhow::bail!("view.skeleton_count must be >= 1");
        }

        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    Config::from_toml(&content)
}

/// Load `path` when given, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::minimal()),
    }
}
