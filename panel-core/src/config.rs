use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{presenter::DEFAULT_PLACEHOLDER, source::SourceKind};

/// Environment variable that overrides the stored weatherapi.com key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/weather";
const DEFAULT_WEATHERAPI_BASE: &str = "https://api.weatherapi.com";
const DEFAULT_LOCATION: &str = "melbourne";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The fixed endpoint serving a ready-made weather document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self { url: DEFAULT_ENDPOINT.to_string() }
    }
}

/// Direct access to weatherapi.com.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub location: String,
    pub base_url: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            location: DEFAULT_LOCATION.to_string(),
            base_url: DEFAULT_WEATHERAPI_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_source = "weatherapi"
/// [weatherapi]
/// api_key = "..."
/// location = "melbourne"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// One of "endpoint", "weatherapi" or "file". Unset means "endpoint".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub endpoint: EndpointConfig,
    pub weatherapi: WeatherApiConfig,
    pub file: FileConfig,
}

impl Config {
    /// Return the default source as a strongly-typed SourceKind.
    pub fn default_source_kind(&self) -> Result<SourceKind> {
        match self.default_source.as_deref() {
            None => Ok(SourceKind::Endpoint),
            Some(s) => SourceKind::try_from(s),
        }
    }

    pub fn set_default_source(&mut self, kind: SourceKind) {
        self.default_source = Some(kind.as_str().to_string());
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Returns the weatherapi.com key, if present and non-empty.
    pub fn weatherapi_key(&self) -> Option<&str> {
        self.weatherapi.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Set the weatherapi.com key and make it the default source if none is chosen yet.
    pub fn upsert_weatherapi_key(&mut self, api_key: String) {
        self.weatherapi.api_key = Some(api_key);

        if self.default_source.is_none() {
            self.set_default_source(SourceKind::WeatherApi);
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// Environment overrides are applied on top.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-panel", "weather-panel")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.weatherapi.api_key = Some(key);
        }
    }
}
