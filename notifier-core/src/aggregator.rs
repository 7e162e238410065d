use crate::{
    error::NotifierError,
    http::HttpClient,
    logging,
    model::{PrecipitationData, WeatherReading},
    provider::{
        self, PrecipitationSource, PrimaryWeatherSource, ProviderId, jma::JmaClient,
    },
};

/// Combines the primary provider with the JMA precipitation feed.
///
/// The two fetches run concurrently. A primary failure fails the whole call;
/// a precipitation failure is logged and replaced by 0%.
#[derive(Debug)]
pub struct WeatherAggregator {
    primary: Box<dyn PrimaryWeatherSource>,
    precipitation: Box<dyn PrecipitationSource>,
}

impl WeatherAggregator {
    pub fn new(
        primary: Box<dyn PrimaryWeatherSource>,
        precipitation: Box<dyn PrecipitationSource>,
    ) -> Self {
        Self {
            primary,
            precipitation,
        }
    }

    /// Production wiring: `id` as primary, JMA for precipitation.
    pub fn for_provider(id: ProviderId, http: HttpClient) -> Self {
        Self::new(
            provider::primary_source(id, http.clone()),
            Box::new(JmaClient::new(http)),
        )
    }

    pub fn primary_id(&self) -> ProviderId {
        self.primary.id()
    }

    pub async fn get_weather(&self, api_key: &str) -> Result<WeatherReading, NotifierError> {
        tracing::info!(
            provider = %self.primary.id(),
            "Fetching weather data from primary provider and JMA API"
        );

        let (primary, precipitation) =
            tokio::join!(self.primary.fetch(api_key), self.precipitation_or_default());

        let primary = primary.inspect_err(|err| {
            logging::log_error("Failed to fetch weather data from hybrid APIs", err)
        })?;

        let reading = WeatherReading::merge(primary, precipitation);
        tracing::info!(
            current = reading.temperature.current,
            min = reading.temperature.min,
            max = reading.temperature.max,
            precipitation = reading.precipitation,
            description = %reading.description,
            emoji = %reading.emoji,
            "Weather data fetched successfully"
        );

        Ok(reading)
    }

    async fn precipitation_or_default(&self) -> PrecipitationData {
        match self.precipitation.fetch().await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch JMA precipitation, using 0%");
                PrecipitationData::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::HttpError,
        logging::capture::Capture,
        model::{ConditionCode, PrimaryWeatherData, Temperature},
    };
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedPrimary(Option<PrimaryWeatherData>);

    #[async_trait]
    impl PrimaryWeatherSource for FixedPrimary {
        fn id(&self) -> ProviderId {
            ProviderId::WeatherApi
        }

        async fn fetch(&self, api_key: &str) -> Result<PrimaryWeatherData, NotifierError> {
            assert_eq!(api_key, "test-api-key");
            self.0.clone().ok_or_else(|| {
                HttpError::Status {
                    url: "https://api.weatherapi.test".into(),
                    status: 403,
                    body: "API key disabled".into(),
                }
                .into()
            })
        }
    }

    #[derive(Debug)]
    struct FixedPrecipitation(Option<u8>);

    #[async_trait]
    impl PrecipitationSource for FixedPrecipitation {
        async fn fetch(&self) -> Result<PrecipitationData, NotifierError> {
            self.0
                .map(|precipitation| PrecipitationData { precipitation })
                .ok_or_else(|| NotifierError::MissingData("JMA API error".into()))
        }
    }

    fn sunny() -> PrimaryWeatherData {
        PrimaryWeatherData {
            current_temp: 15,
            min_temp: 10,
            max_temp: 20,
            condition: "晴れ".into(),
            condition_code: ConditionCode::Numeric(1000),
            emoji: "☀️".into(),
        }
    }

    #[tokio::test]
    async fn merges_primary_and_precipitation() {
        let agg = WeatherAggregator::new(
            Box::new(FixedPrimary(Some(sunny()))),
            Box::new(FixedPrecipitation(Some(30))),
        );

        let reading = agg.get_weather("test-api-key").await.unwrap();

        assert_eq!(reading.temperature, Temperature { current: 15, min: 10, max: 20 });
        assert_eq!(reading.description, "晴れ");
        assert_eq!(reading.emoji, "☀️");
        assert_eq!(reading.precipitation, 30);
    }

    #[tokio::test]
    async fn precipitation_failure_falls_back_to_zero() {
        let agg = WeatherAggregator::new(
            Box::new(FixedPrimary(Some(sunny()))),
            Box::new(FixedPrecipitation(None)),
        );

        let reading = agg.get_weather("test-api-key").await.unwrap();

        assert_eq!(reading.precipitation, 0);
        assert_eq!(reading.description, "晴れ");
    }

    #[tokio::test]
    async fn primary_failure_propagates_unchanged() {
        let agg = WeatherAggregator::new(
            Box::new(FixedPrimary(None)),
            Box::new(FixedPrecipitation(Some(30))),
        );

        let err = agg.get_weather("test-api-key").await.unwrap_err();

        match err {
            NotifierError::Http(HttpError::Status { status, body, .. }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key disabled");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_entry_carries_reading_fields() {
        let out = Capture::default();
        let _guard = tracing::subscriber::set_default(out.subscriber());

        let agg = WeatherAggregator::new(
            Box::new(FixedPrimary(Some(sunny()))),
            Box::new(FixedPrecipitation(None)),
        );
        agg.get_weather("test-api-key").await.unwrap();

        let entries = out.entries();
        assert!(entries.iter().any(|e| e["level"] == "WARN"
            && e["message"] == "Failed to fetch JMA precipitation, using 0%"));

        let done = entries
            .iter()
            .find(|e| e["message"] == "Weather data fetched successfully")
            .expect("success entry");
        assert_eq!(done["current"], 15);
        assert_eq!(done["min"], 10);
        assert_eq!(done["max"], 20);
        assert_eq!(done["precipitation"], 0);
        assert_eq!(done["description"], "晴れ");
    }
}
