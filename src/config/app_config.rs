//! Application configuration
//!
//! Settings are stored as camelCase JSON. Every field has a default so a
//! partial (or missing) file is valid; a few values can be overridden from
//! the environment after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Paths;

pub const DEFAULT_DEEZER_API_URL: &str = "https://api.deezer.com";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_IMAGE: &str = "/assets/default-artist.jpg";

/// How enrichment and album data reach the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentMode {
    /// Resolve only once every secondary request has been merged
    #[default]
    Combined,
    /// Return the primary record at once, patch the cache later and notify
    Progressive,
}

/// Dev proxy flavour
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// Single catch-all handler
    #[default]
    Manual,
    /// Scoped proxy service plus a static file service
    Middleware,
}

impl ProxyMode {
    pub fn default_port(&self) -> u16 {
        match self {
            ProxyMode::Manual => 8081,
            ProxyMode::Middleware => 3000,
        }
    }
}

/// Dev proxy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(default)]
    pub mode: ProxyMode,

    /// Listening port; falls back to the mode's default
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default = "default_host")]
    pub host: String,

    /// Built single-page application
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Request prefix that is forwarded upstream
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_deezer_api_url")]
    pub upstream: String,

    /// Origin header sent upstream; `http://localhost:{port}` when unset
    #[serde(default)]
    pub origin: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mode: ProxyMode::default(),
            port: None,
            host: default_host(),
            dist_dir: default_dist_dir(),
            api_prefix: default_api_prefix(),
            upstream: default_deezer_api_url(),
            origin: None,
        }
    }
}

impl ProxyConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.mode.default_port())
    }

    pub fn origin(&self) -> String {
        self.origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port()))
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Deezer base URL; point it at a dev proxy prefix to go through it
    #[serde(default = "default_deezer_api_url")]
    pub deezer_api_url: String,

    #[serde(default = "default_lastfm_api_url")]
    pub lastfm_api_url: String,

    /// Empty disables the Last.fm client
    #[serde(default)]
    pub lastfm_api_key: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Attempts per upstream request, without delay between them
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_top_artists_count")]
    pub top_artists_count: usize,

    #[serde(default = "default_album_limit")]
    pub album_limit: usize,

    #[serde(default = "default_top_tracks_limit")]
    pub top_tracks_limit: usize,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    #[serde(default)]
    pub enrichment_mode: EnrichmentMode,

    /// Placeholder used when no upstream image passes validation
    #[serde(default = "default_image")]
    pub default_image: String,

    /// Demo artists file; the embedded set is used when unset
    #[serde(default)]
    pub demo_data_path: Option<PathBuf>,

    /// Seed for the cosmetic rating/progress values
    #[serde(default)]
    pub cosmetic_seed: Option<u64>,

    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deezer_api_url: default_deezer_api_url(),
            lastfm_api_url: default_lastfm_api_url(),
            lastfm_api_key: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
            top_artists_count: default_top_artists_count(),
            album_limit: default_album_limit(),
            top_tracks_limit: default_top_tracks_limit(),
            search_limit: default_search_limit(),
            enrichment_mode: EnrichmentMode::default(),
            default_image: default_image(),
            demo_data_path: None,
            cosmetic_seed: None,
            proxy: ProxyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file, or from the settings file in
    /// the config directory (written with defaults when missing)
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::read(path)?,
            None => {
                let paths = Paths::init(None)?;
                tracing::debug!("Config directory: {:?}", paths.config_dir());
                let settings_path = paths.settings_path();
                if settings_path.exists() {
                    Self::read(&settings_path)?
                } else {
                    let config = Self::default();
                    config.save(&settings_path)?;
                    config
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Apply `PORT`, `DEEZER_API_URL` and `LASTFM_API_KEY`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.proxy.port = Some(port),
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{}'", port),
            }
        }

        if let Some(url) = lookup("DEEZER_API_URL").filter(|u| !u.trim().is_empty()) {
            self.deezer_api_url = url.trim().to_string();
        }

        if let Some(key) = lookup("LASTFM_API_KEY") {
            self.lastfm_api_key = key.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

// Default value functions for serde

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist").join("browser")
}

fn default_api_prefix() -> String {
    "/api/deezer".to_string()
}

fn default_deezer_api_url() -> String {
    DEFAULT_DEEZER_API_URL.to_string()
}

fn default_lastfm_api_url() -> String {
    DEFAULT_LASTFM_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_top_artists_count() -> usize {
    10
}

fn default_album_limit() -> usize {
    10
}

fn default_top_tracks_limit() -> usize {
    5
}

fn default_search_limit() -> usize {
    10
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}
