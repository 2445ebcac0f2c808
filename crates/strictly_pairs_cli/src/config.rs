//! Application configuration loaded from TOML and the environment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_pairs::{ContentSource, SessionConfig};
use strictly_pairs_content::{CatalogSource, DEFAULT_BASE_URL, FallbackSource, RawgConfig, RawgSource};
use tracing::{debug, info, instrument, warn};

/// Environment variable consulted when no RAWG key is configured.
pub const RAWG_API_KEY_VAR: &str = "RAWG_API_KEY";

/// Where card content comes from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    /// Built-in glyph catalog.
    #[default]
    Builtin,
    /// RAWG games API, topped up from the catalog.
    Rawg,
}

/// Content provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ContentConfig {
    /// Provider to deal cards from.
    #[serde(default)]
    provider: Provider,

    /// RAWG API root.
    #[serde(default = "default_rawg_base_url")]
    rawg_base_url: String,

    /// RAWG API key; falls back to `RAWG_API_KEY`.
    #[serde(default)]
    #[setters(strip_option)]
    rawg_api_key: Option<String>,
}

fn default_rawg_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            rawg_base_url: default_rawg_base_url(),
            rawg_api_key: None,
        }
    }
}

impl ContentConfig {
    /// Configured RAWG key, else the `RAWG_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.rawg_api_key
            .clone()
            .or_else(|| std::env::var(RAWG_API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Builds the configured content source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if RAWG is selected but no API key is available.
    #[instrument(skip(self), fields(provider = %self.provider))]
    pub fn build_source(&self) -> Result<Box<dyn ContentSource>, ConfigError> {
        match self.provider {
            Provider::Builtin => {
                debug!("Using built-in catalog");
                Ok(Box::new(CatalogSource::builtin()))
            }
            Provider::Rawg => {
                let api_key = self.resolve_api_key().ok_or_else(|| {
                    ConfigError::new(format!(
                        "RAWG provider needs rawg_api_key or {} to be set",
                        RAWG_API_KEY_VAR
                    ))
                })?;
                info!(base_url = %self.rawg_base_url, "Using RAWG with catalog fallback");
                let rawg = RawgSource::new(RawgConfig::new(self.rawg_base_url.clone(), api_key));
                Ok(Box::new(FallbackSource::new(rawg, CatalogSource::builtin())))
            }
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Session settings.
    #[serde(default)]
    game: SessionConfig,

    /// Content provider settings.
    #[serde(default)]
    content: ContentConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(provider = %config.content.provider, level = config.game.level(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        warn!(error_message = %message, "Config error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
