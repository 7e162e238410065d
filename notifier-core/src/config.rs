use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path, path::PathBuf};

use crate::provider::ProviderId;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Primary provider id, "weatherapi" (default) or "openweather".
    pub primary_provider: Option<String>,

    /// Secret values keyed by secret name.
    ///
    /// Example TOML:
    /// [secrets]
    /// "/weather-bot/weatherapi-key" = "..."
    #[serde(default)]
    pub secrets: HashMap<String, String>,
}

impl Config {
    /// The configured primary provider, falling back to WeatherAPI.
    pub fn primary_provider_id(&self) -> Result<ProviderId> {
        match self.primary_provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::default()),
        }
    }

    pub fn set_primary_provider(&mut self, id: ProviderId) {
        self.primary_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
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
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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
        let dirs = ProjectDirs::from("dev", "weather-bot", "weather-notifier")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_secret(&mut self, name: &str, value: String) {
        self.secrets.insert(name.to_string(), value);
    }

    /// Store a provider API key; the first provider configured becomes primary.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.set_secret(provider_id.secret_name(), api_key);

        if self.primary_provider.is_none() {
            self.set_primary_provider(provider_id);
        }
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.secrets
            .get(provider_id.secret_name())
            .is_some_and(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets;

    #[test]
    fn primary_provider_defaults_to_weatherapi() {
        let cfg = Config::default();
        assert_eq!(cfg.primary_provider_id().unwrap(), ProviderId::WeatherApi);
    }

    #[test]
    fn unknown_primary_provider_is_rejected() {
        let cfg = Config {
            primary_provider: Some("darksky".into()),
            ..Config::default()
        };

        let err = cfg.primary_provider_id().unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn set_api_key_and_primary_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.primary_provider_id().unwrap(), ProviderId::OpenWeather);
        assert_eq!(
            cfg.secrets.get(secrets::OPENWEATHER_API_KEY).map(String::as_str),
            Some("OPEN_KEY")
        );
        assert!(cfg.is_provider_configured(ProviderId::OpenWeather));
        assert!(!cfg.is_provider_configured(ProviderId::WeatherApi));
    }

    #[test]
    fn upsert_does_not_override_existing_primary() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WEATHER_KEY".into());
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.primary_provider_id().unwrap(), ProviderId::WeatherApi);

        cfg.set_primary_provider(ProviderId::OpenWeather);
        assert_eq!(cfg.primary_provider_id().unwrap(), ProviderId::OpenWeather);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("weather-notifier-test-{}", std::process::id()))
            .join("config.toml");

        let mut cfg = Config::default();
        cfg.set_secret(secrets::LINE_CHANNEL_ACCESS_TOKEN, "token".into());
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "key".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.primary_provider_id().unwrap(), ProviderId::WeatherApi);
        assert_eq!(loaded.secrets, cfg.secrets);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn missing_file_loads_default() {
        let path = std::env::temp_dir().join("weather-notifier-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.primary_provider.is_none());
        assert!(cfg.secrets.is_empty());
    }
}
