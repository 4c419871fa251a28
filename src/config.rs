//! Configuration management for MovieFinder
//!
//! Handles config file loading/saving and API key resolution.
//! Config is stored at ~/.config/moviefinder/config.toml

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::omdb::DEFAULT_BASE_URL;
use crate::api::OmdbClient;
use crate::models::{MediaType, SearchFilters};

/// Environment variable holding the OMDb API key
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OMDb API key (the environment variable wins over this)
    pub api_key: Option<String>,
    /// Endpoint override, mostly for self-hosted mirrors
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Query the search screen starts with
    pub default_query: String,
    /// Media type the search screen starts with ("" for all)
    pub default_type: String,
    /// Year the search screen starts with
    pub default_year: Option<u16>,
    /// Drop responses that arrive after a newer request was issued
    pub stale_guard: bool,
}

impl Default for Config {
    fn default() -> Self {
        let filters = SearchFilters::default();
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            default_query: filters.query,
            default_type: filters.media_type.as_param().to_string(),
            default_year: None,
            stale_guard: true,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/moviefinder/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moviefinder").join("config.toml"))
    }

    /// Load config from the default location. A missing file silently
    /// yields defaults.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Load config from a specific file. Unreadable or malformed files are
    /// logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            warn!(
                path = %path.display(),
                error = %format!("{:#}", e),
                "Ignoring config file, using defaults"
            );
            Self::default()
        })
    }

    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the API key:
    /// 1. Environment variable OMDB_API_KEY
    /// 2. Key from the config file
    pub fn api_key(&self) -> Result<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn resolve_api_key(env: Option<String>, file: Option<&str>) -> Result<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| file.filter(|k| !k.trim().is_empty()).map(str::to_string))
            .ok_or_else(|| {
                anyhow!(
                    "No OMDb API key: set {} or api_key in {}",
                    API_KEY_ENV,
                    Self::path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "the config file".into())
                )
            })
    }

    /// Initial filters for the search screen
    pub fn initial_filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.default_query.clone(),
            year: self.default_year.filter(|y| *y > 0),
            media_type: MediaType::from_param(&self.default_type).unwrap_or_default(),
            page: 1,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Build a client carrying the resolved key
    pub fn client(&self) -> Result<OmdbClient> {
        Ok(OmdbClient::with_timeout(
            self.api_key()?,
            self.base_url.clone(),
            self.timeout(),
        ))
    }
}
