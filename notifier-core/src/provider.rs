use crate::{
    error::NotifierError,
    http::HttpClient,
    model::{PrecipitationData, PrimaryWeatherData},
    provider::{openweather::OpenWeatherClient, weatherapi::WeatherApiClient},
    secrets,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod jma;
pub mod openweather;
pub mod weatherapi;

/// Providers that can serve as the primary (temperature/condition) source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderId {
    #[default]
    WeatherApi,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::WeatherApi, ProviderId::OpenWeather]
    }

    /// Name of the secret holding this provider's API key.
    pub fn secret_name(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => secrets::WEATHERAPI_KEY,
            ProviderId::OpenWeather => secrets::OPENWEATHER_API_KEY,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weatherapi" => Ok(ProviderId::WeatherApi),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: weatherapi, openweather."
            )),
        }
    }
}

/// Source of current temperature, the day's range and the condition.
#[async_trait]
pub trait PrimaryWeatherSource: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, api_key: &str) -> Result<PrimaryWeatherData, NotifierError>;
}

/// Source of the day's precipitation probability.
#[async_trait]
pub trait PrecipitationSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<PrecipitationData, NotifierError>;
}

/// Construct the primary source for `id` with production endpoints.
pub fn primary_source(id: ProviderId, http: HttpClient) -> Box<dyn PrimaryWeatherSource> {
    match id {
        ProviderId::WeatherApi => Box::new(WeatherApiClient::new(http)),
        ProviderId::OpenWeather => Box::new(OpenWeatherClient::new(http)),
    }
}
