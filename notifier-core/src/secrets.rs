//! Named secret lookup.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{config::Config, error::SecretError};

pub const WEATHERAPI_KEY: &str = "/weather-bot/weatherapi-key";
pub const OPENWEATHER_API_KEY: &str = "/weather-bot/openweather-api-key";
pub const LINE_CHANNEL_ACCESS_TOKEN: &str = "/weather-bot/line-channel-access-token";

/// Resolves secrets by name. Empty values are reported as not found.
#[async_trait]
pub trait SecretProvider: Send + Sync + std::fmt::Debug {
    async fn get(&self, name: &str) -> Result<String, SecretError>;
}

fn non_empty(name: &str, value: Option<&String>) -> Result<String, SecretError> {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| SecretError::NotFound {
            name: name.to_string(),
        })
}

/// Environment variable holding `name`: `/weather-bot/weatherapi-key` →
/// `WEATHER_BOT_WEATHERAPI_KEY`.
pub fn env_var_name(name: &str) -> String {
    name.trim_start_matches('/')
        .chars()
        .map(|c| match c {
            '/' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Secrets from environment variables, snapshotted at construction.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretProvider {
    vars: HashMap<String, String>,
}

impl EnvSecretProvider {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        non_empty(name, self.vars.get(&env_var_name(name)))
    }
}

/// Secrets stored in the `[secrets]` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigSecretProvider {
    secrets: HashMap<String, String>,
}

impl ConfigSecretProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            secrets: config.secrets.clone(),
        }
    }
}

#[async_trait]
impl SecretProvider for ConfigSecretProvider {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        non_empty(name, self.secrets.get(name))
    }
}

/// Tries each provider in order. `NotFound` falls through to the next one;
/// any other error is returned immediately.
#[derive(Debug, Default)]
pub struct LayeredSecretProvider {
    layers: Vec<Box<dyn SecretProvider>>,
}

impl LayeredSecretProvider {
    pub fn new(layers: Vec<Box<dyn SecretProvider>>) -> Self {
        Self { layers }
    }

    /// Environment first, then the config file.
    pub fn from_env_and_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(EnvSecretProvider::from_env()),
            Box::new(ConfigSecretProvider::new(config)),
        ])
    }
}

#[async_trait]
impl SecretProvider for LayeredSecretProvider {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        for layer in &self.layers {
            match layer.get(name).await {
                Err(SecretError::NotFound { .. }) => continue,
                other => return other,
            }
        }

        Err(SecretError::NotFound {
            name: name.to_string(),
        })
    }
}
