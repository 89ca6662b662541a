//! Configuration loading and API base resolution
//!
//! The API base URL follows the same priority order the rest of the
//! configuration machinery uses:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`TROUPE_API_BASE`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the API base URL
pub const API_BASE_ENV: &str = "TROUPE_API_BASE";

/// Compiled default API base
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Client tunables, fully resolved.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Base URL of the directory backend
    pub api_base: String,
    /// Age below which the artist snapshot is served without a fetch
    pub cache_ttl: Duration,
    /// Quiet interval before a keystroke burst triggers a search pass
    pub debounce: Duration,
    /// Delay between startup load attempts
    pub retry_delay: Duration,
    /// Startup load attempt cap; `None` retries indefinitely
    pub max_retries: Option<u32>,
    /// Maximum accepted query length in characters
    pub query_max_len: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl: Duration::from_secs(5 * 60),
            debounce: Duration::from_millis(200),
            retry_delay: Duration::from_secs(5),
            max_retries: None,
            query_max_len: 100,
        }
    }
}

/// On-disk representation; every field optional so a partial file works.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base: Option<String>,
    cache_ttl_secs: Option<u64>,
    debounce_ms: Option<u64>,
    retry_delay_secs: Option<u64>,
    max_retries: Option<u32>,
    query_max_len: Option<usize>,
}

/// Default configuration file path for the platform
/// (`<config dir>/troupe/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("troupe").join("config.toml"))
}

impl UiConfig {
    /// Resolve the full configuration.
    ///
    /// `cli_api_base` wins over `TROUPE_API_BASE`, which wins over the
    /// config file, which wins over compiled defaults. `config_path`
    /// overrides the default file location; a missing file at the
    /// default location is not an error, a missing explicit file is.
    pub fn resolve(cli_api_base: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(load_file(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(load_file(&path)?),
                _ => None,
            },
        };
        let file = file.unwrap_or_default();

        let mut config = UiConfig::default();
        if let Some(secs) = file.cache_ttl_secs {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(ms) = file.debounce_ms {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = file.retry_delay_secs {
            config.retry_delay = Duration::from_secs(secs);
        }
        if file.max_retries.is_some() {
            config.max_retries = file.max_retries;
        }
        if let Some(len) = file.query_max_len {
            config.query_max_len = len;
        }

        // Priority 1: command-line argument
        if let Some(base) = cli_api_base {
            config.api_base = base.trim_end_matches('/').to_string();
            return Ok(config);
        }

        // Priority 2: environment variable
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config.api_base = base.trim_end_matches('/').to_string();
                return Ok(config);
            }
        }

        // Priority 3: config file
        if let Some(base) = file.api_base {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        // Priority 4: compiled default (already in place)
        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Cannot parse {}: {}", path.display(), e)))
}
