//! Japan Meteorological Agency forecast feed, used for precipitation only.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::NotifierError,
    http::HttpClient,
    model::PrecipitationData,
    retry::RetryConfig,
};

use super::PrecipitationSource;

/// Kanagawa prefecture forecast.
const FORECAST_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast/140000.json";
/// Eastern Kanagawa, which covers Kawasaki.
pub const AREA_CODE: &str = "140010";

/// Index of the precipitation series within a report's `timeSeries`.
const POP_SERIES: usize = 1;
/// `pops` slots for 06-12h, 12-18h and 18-24h.
const POP_SLOTS: [usize; 3] = [1, 2, 3];

#[derive(Debug, Clone)]
pub struct JmaClient {
    http: HttpClient,
    url: String,
    area_code: String,
    retry: RetryConfig,
}

impl JmaClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            url: FORECAST_URL.to_string(),
            area_code: AREA_CODE.to_string(),
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
struct JmaArea {
    code: String,
}

#[derive(Debug, Deserialize)]
struct JmaAreaSeries {
    area: JmaArea,
    #[serde(default)]
    pops: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct JmaTimeSeries {
    #[serde(default)]
    areas: Vec<JmaAreaSeries>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JmaReport {
    time_series: Vec<JmaTimeSeries>,
}

#[async_trait]
impl PrecipitationSource for JmaClient {
    async fn fetch(&self) -> Result<PrecipitationData, NotifierError> {
        tracing::info!("Fetching precipitation from JMA API");

        let reports = self
            .retry
            .run("Fetch precipitation from JMA API", || {
                self.http.get_json::<Vec<JmaReport>>(&self.url, &[])
            })
            .await?;

        let relevant = afternoon_pops(&reports, &self.area_code)?;
        let precipitation = relevant.iter().copied().max().unwrap_or(0);

        tracing::info!(pops = ?relevant, max = precipitation, "JMA precipitation data retrieved");

        Ok(PrecipitationData { precipitation })
    }
}

/// Probabilities for the 06-12h, 12-18h and 18-24h windows of `area_code`.
fn afternoon_pops(reports: &[JmaReport], area_code: &str) -> Result<[u8; 3], NotifierError> {
    let pops = area_pops(reports, area_code)?;
    Ok(POP_SLOTS.map(|slot| parse_pop(pops.get(slot))))
}

/// Precipitation probabilities of `area_code` in the short-term report.
fn area_pops<'a>(
    reports: &'a [JmaReport],
    area_code: &str,
) -> Result<&'a [String], NotifierError> {
    let not_found = || {
        NotifierError::MissingData(format!("Precipitation data not found for area: {area_code}"))
    };

    let series = reports
        .first()
        .and_then(|short_term| short_term.time_series.get(POP_SERIES))
        .ok_or_else(not_found)?;

    series
        .areas
        .iter()
        .find(|a| a.area.code == area_code)
        .and_then(|a| a.pops.as_deref())
        .filter(|pops| !pops.is_empty())
        .ok_or_else(not_found)
}

/// Leading digits of the entry, capped at 100. Missing or non-numeric
/// entries ("--" for past windows) count as 0.
fn parse_pop(value: Option<&String>) -> u8 {
    let Some(value) = value.map(|v| v.trim()) else {
        return 0;
    };
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..end]
        .parse::<u32>()
        .map_or(0, |v| u8::try_from(v.min(100)).unwrap_or(100))
}
