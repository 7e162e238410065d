//! One scheduled run: secrets → weather → message → broadcast.

use crate::{
    aggregator::WeatherAggregator,
    broadcast::BroadcastClient,
    config::Config,
    error::NotifierError,
    format::format_message,
    http::HttpClient,
    logging,
    secrets::{LINE_CHANNEL_ACCESS_TOKEN, LayeredSecretProvider, SecretProvider},
};

/// Runs the daily notification. Holds no state between runs.
#[derive(Debug)]
pub struct Notifier {
    secrets: Box<dyn SecretProvider>,
    aggregator: WeatherAggregator,
    broadcast: BroadcastClient,
}

impl Notifier {
    pub fn new(
        secrets: Box<dyn SecretProvider>,
        aggregator: WeatherAggregator,
        broadcast: BroadcastClient,
    ) -> Self {
        Self {
            secrets,
            aggregator,
            broadcast,
        }
    }

    /// Production wiring from the on-disk config: secrets from the
    /// environment, then the config file.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let id = config.primary_provider_id()?;
        let http = HttpClient::new();

        Ok(Self::new(
            Box::new(LayeredSecretProvider::from_env_and_config(config)),
            WeatherAggregator::for_provider(id, http.clone()),
            BroadcastClient::new(http),
        ))
    }

    /// Fetch, format and broadcast. Any failure is logged and returned
    /// unchanged; nothing is sent unless every earlier step succeeded.
    pub async fn run(&self) -> Result<(), NotifierError> {
        tracing::info!("Weather notification started");

        match self.notify().await {
            Ok(()) => {
                tracing::info!("Weather notification completed successfully");
                Ok(())
            }
            Err(err) => {
                logging::log_error("Weather notification failed", &err);
                Err(err)
            }
        }
    }

    /// Build today's message without broadcasting it.
    pub async fn preview(&self) -> Result<String, NotifierError> {
        let api_key = self.secrets.get(self.api_key_name()).await?;
        let reading = self.aggregator.get_weather(&api_key).await?;
        Ok(format_message(&reading))
    }

    async fn notify(&self) -> Result<(), NotifierError> {
        let (api_key, access_token) = tokio::try_join!(
            self.secrets.get(self.api_key_name()),
            self.secrets.get(LINE_CHANNEL_ACCESS_TOKEN)
        )?;

        let reading = self.aggregator.get_weather(&api_key).await?;
        let message = format_message(&reading);
        self.broadcast.send(&access_token, &message).await?;

        Ok(())
    }

    fn api_key_name(&self) -> &'static str {
        self.aggregator.primary_id().secret_name()
    }
}
