use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::{
    conditions::{self, DEFAULT_EMOJI},
    error::NotifierError,
    http::HttpClient,
    model::{ConditionCode, PrimaryWeatherData, round_celsius},
    retry::RetryConfig,
};

use super::{PrimaryWeatherSource, ProviderId};

const FORECAST_URL: &str = "https://api.weatherapi.com/v1/forecast.json";
const LOCATION: &str = "Kawasaki,Japan";
const FORECAST_DAYS: &str = "1";
const LANG: &str = "ja";

/// Daytime window used for min/max, in local hours, both ends inclusive.
const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = 23;

/// WeatherAPI.com forecast client.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    http: HttpClient,
    url: String,
    retry: RetryConfig,
}

impl WeatherApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            url: FORECAST_URL.to_string(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: u32,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    /// Local time, "YYYY-MM-DD HH:MM".
    time: String,
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    current: WaCurrent,
    forecast: WaForecast,
}

#[async_trait]
impl PrimaryWeatherSource for WeatherApiClient {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn fetch(&self, api_key: &str) -> Result<PrimaryWeatherData, NotifierError> {
        tracing::info!("Fetching weather from Weather API");

        let query = [
            ("key", api_key),
            ("q", LOCATION),
            ("days", FORECAST_DAYS),
            ("lang", LANG),
            ("aqi", "no"),
            ("alerts", "no"),
        ];

        let response = self
            .retry
            .run("Fetch weather from Weather API", || {
                self.http.get_json::<WaForecastResponse>(&self.url, &query)
            })
            .await?;

        let data = summarize(response)?;
        tracing::info!(
            current = data.current_temp,
            min = data.min_temp,
            max = data.max_temp,
            condition = %data.condition,
            "Weather API data retrieved"
        );

        Ok(data)
    }
}

fn summarize(response: WaForecastResponse) -> Result<PrimaryWeatherData, NotifierError> {
    let today = response.forecast.forecastday.first().ok_or_else(|| {
        NotifierError::MissingData("Weather API response contained no forecastday data".into())
    })?;

    let daytime: Vec<&WaForecastHour> = today
        .hour
        .iter()
        .filter(|h| {
            local_hour(&h.time).is_some_and(|hour| (FIRST_HOUR..=LAST_HOUR).contains(&hour))
        })
        .collect();

    tracing::info!(
        count = daytime.len(),
        times = ?daytime.iter().map(|h| h.time.as_str()).collect::<Vec<_>>(),
        "Filtered today hours (09:00-23:00)"
    );

    if daytime.is_empty() {
        return Err(NotifierError::MissingData(
            "Weather API response contained no hourly data between 09:00 and 23:00".into(),
        ));
    }

    let max_temp = daytime.iter().map(|h| h.temp_c).fold(f64::NEG_INFINITY, f64::max);
    let min_temp = daytime.iter().map(|h| h.temp_c).fold(f64::INFINITY, f64::min);

    let WaCondition { text, code } = response.current.condition;
    let emoji = conditions::weatherapi_emoji(code).unwrap_or(DEFAULT_EMOJI);
    let condition = conditions::weatherapi_description_ja(code)
        .map(str::to_string)
        .unwrap_or(text);

    Ok(PrimaryWeatherData {
        current_temp: round_celsius(response.current.temp_c),
        min_temp: round_celsius(min_temp),
        max_temp: round_celsius(max_temp),
        condition,
        condition_code: ConditionCode::Numeric(code),
        emoji: emoji.to_string(),
    })
}

fn local_hour(time: &str) -> Option<u32> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .ok()
        .map(|dt| dt.hour())
}
