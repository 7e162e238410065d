use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::Deserialize;

use crate::{
    conditions::{self, DEFAULT_EMOJI},
    error::NotifierError,
    http::HttpClient,
    model::{ConditionCode, PrimaryWeatherData, round_celsius},
    retry::RetryConfig,
};

use super::{PrimaryWeatherSource, ProviderId};

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const LATITUDE: &str = "35.5309";
const LONGITUDE: &str = "139.7028";
/// Kawasaki local time (JST).
const UTC_OFFSET_SECS: i32 = 9 * 3600;

/// OpenWeather 5-day / 3-hour forecast client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: HttpClient,
    url: String,
    retry: RetryConfig,
}

impl OpenWeatherClient {
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
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl PrimaryWeatherSource for OpenWeatherClient {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn fetch(&self, api_key: &str) -> Result<PrimaryWeatherData, NotifierError> {
        tracing::info!(
            lat = LATITUDE,
            lon = LONGITUDE,
            "Fetching weather data from OpenWeather API"
        );

        let query = [
            ("lat", LATITUDE),
            ("lon", LONGITUDE),
            ("appid", api_key),
            ("units", "metric"),
            ("lang", "ja"),
        ];

        let response = self
            .retry
            .run("Fetch weather data", || {
                self.http.get_json::<OwForecastResponse>(&self.url, &query)
            })
            .await?;

        let data = summarize(&response, Utc::now())?;
        tracing::info!(
            current = data.current_temp,
            min = data.min_temp,
            max = data.max_temp,
            condition = %data.condition,
            "OpenWeather data retrieved"
        );

        Ok(data)
    }
}

fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Entries for today between 09:00 and 23:00 local time, falling back to the
/// first entry when none qualify.
fn summarize(
    response: &OwForecastResponse,
    now: DateTime<Utc>,
) -> Result<PrimaryWeatherData, NotifierError> {
    let offset = local_offset();
    let today = now.with_timezone(&offset).date_naive();

    let mut daytime: Vec<&OwForecastEntry> = response
        .list
        .iter()
        .filter(|entry| {
            DateTime::from_timestamp(entry.dt, 0)
                .map(|ts| ts.with_timezone(&offset))
                .is_some_and(|local| {
                    local.date_naive() == today && (9..=23).contains(&local.hour())
                })
        })
        .collect();

    tracing::info!(
        count = daytime.len(),
        times = ?daytime.iter().map(|e| e.dt).collect::<Vec<_>>(),
        "Filtered today forecasts (09:00-23:00)"
    );

    if daytime.is_empty() {
        let first = response.list.first().ok_or_else(|| {
            NotifierError::MissingData("OpenWeather forecast response contained no data".into())
        })?;
        tracing::warn!("No forecast data for today 09:00-23:00, using first item");
        daytime.push(first);
    }

    let max_temp = daytime.iter().map(|e| e.main.temp).fold(f64::NEG_INFINITY, f64::max);
    let min_temp = daytime.iter().map(|e| e.main.temp).fold(f64::INFINITY, f64::min);

    let nearest = daytime[0];
    let weather = nearest.weather.first();
    let main = weather.map_or("Unknown", |w| w.main.as_str());
    let condition = weather.map_or_else(|| "不明".to_string(), |w| w.description.clone());
    let emoji = conditions::openweather_emoji(main).unwrap_or(DEFAULT_EMOJI);

    Ok(PrimaryWeatherData {
        current_temp: round_celsius(nearest.main.temp),
        min_temp: round_celsius(min_temp),
        max_temp: round_celsius(max_temp),
        condition,
        condition_code: ConditionCode::Named(main.to_string()),
        emoji: emoji.to_string(),
    })
}
