//! Core library for the daily weather notifier.
//!
//! This crate defines:
//! - Retry with exponential backoff for every outbound HTTP call
//! - Primary weather providers and the JMA precipitation feed
//! - Merging both into a single [`WeatherReading`] and rendering the message
//! - Broadcasting through the LINE Messaging API
//! - Secret resolution, on-disk configuration and JSON logging
//!
//! It is used by `notifier-cli`, but the [`Notifier`] can be driven by any
//! scheduler.

pub mod aggregator;
pub mod broadcast;
pub mod conditions;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod provider;
pub mod retry;
pub mod secrets;

pub use aggregator::WeatherAggregator;
pub use broadcast::BroadcastClient;
pub use config::Config;
pub use error::{HttpError, NetworkErrorKind, NotifierError, Retryable, SecretError};
pub use format::format_message;
pub use http::HttpClient;
pub use model::{PrecipitationData, PrimaryWeatherData, Temperature, WeatherReading};
pub use notifier::Notifier;
pub use provider::{PrecipitationSource, PrimaryWeatherSource, ProviderId};
pub use retry::{RetryConfig, retry_with_backoff};
pub use secrets::SecretProvider;
