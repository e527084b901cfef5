use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, GeoCoordinate, Identity};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const STORE_URL_ENV: &str = "FARMDASH_STORE_URL";
pub const STORE_KEY_ENV: &str = "FARMDASH_STORE_KEY";

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Weather widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// Hosted database holding the `orders` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weather]
/// api_key = "..."
///
/// [store]
/// url = "https://project.example.co"
/// api_key = "..."
///
/// [account]
/// id = "b7d1..."
/// name = "Asha"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// Signed-in buyer, if any.
    pub account: Option<Identity>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

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
        let dirs = ProjectDirs::from("dev", "farmdash", "farmdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; set values win over the file.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.weather.api_key = Some(key);
        }
        if let Some(url) = lookup(STORE_URL_ENV) {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup(STORE_KEY_ENV) {
            self.store.api_key = Some(key);
        }
        self
    }

    /// Weather API key, treating an empty string as absent.
    pub fn weather_api_key(&self) -> Option<&str> {
        non_empty(self.weather.api_key.as_deref())
    }

    pub fn default_coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.weather.latitude, self.weather.longitude)
    }

    pub fn store_url(&self) -> Option<&str> {
        non_empty(self.store.url.as_deref())
    }

    pub fn store_api_key(&self) -> Option<&str> {
        non_empty(self.store.api_key.as_deref())
    }

    pub fn is_store_configured(&self) -> bool {
        self.store_url().is_some() && self.store_api_key().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_uses_fallback_location() {
        let cfg = Config::default();

        assert_eq!(cfg.default_coordinate(), GeoCoordinate::default());
        assert_eq!(cfg.weather.base_url, DEFAULT_WEATHER_BASE_URL);
        assert!(cfg.weather_api_key().is_none());
        assert!(!cfg.is_store_configured());
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.weather.api_key = Some("   ".into());

        assert!(cfg.weather_api_key().is_none());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut cfg = Config::default();
        cfg.weather.api_key = Some("FILE_KEY".into());
        cfg.store.url = Some("https://file.example".into());

        let env: HashMap<&str, &str> =
            HashMap::from([(API_KEY_ENV, "ENV_KEY"), (STORE_KEY_ENV, "STORE_KEY")]);
        let cfg = cfg.with_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.weather_api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.store_url(), Some("https://file.example"));
        assert_eq!(cfg.store_api_key(), Some("STORE_KEY"));
        assert!(cfg.is_store_configured());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [weather]
            api_key = "KEY"

            [account]
            id = "buyer-1"
            name = "Asha"
            "#,
        )
        .expect("config must parse");

        assert_eq!(cfg.weather_api_key(), Some("KEY"));
        assert_eq!(cfg.weather.latitude, DEFAULT_LATITUDE);
        assert_eq!(cfg.account.as_ref().map(|a| a.name.as_str()), Some("Asha"));
        assert!(cfg.store.url.is_none());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.weather.api_key = Some("KEY".into());
        cfg.weather.latitude = 10.0;
        cfg.store.url = Some("https://store.example".into());
        cfg.save_to(&path).expect("save must succeed");

        let loaded = Config::load_from(&path).expect("load must succeed");
        assert_eq!(loaded.weather_api_key(), Some("KEY"));
        assert_eq!(loaded.default_coordinate().latitude, 10.0);
        assert_eq!(loaded.store_url(), Some("https://store.example"));
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert!(cfg.account.is_none());
    }
}
