//! LINE Messaging API broadcast.

use serde::Serialize;

use crate::{error::HttpError, http::HttpClient, retry::RetryConfig};

const BROADCAST_URL: &str = "https://api.line.me/v2/bot/message/broadcast";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastRequest {
    pub messages: Vec<Message>,
}

impl BroadcastRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::Text { text: text.into() }],
        }
    }
}

/// Pushes one text message to every subscriber of the channel.
#[derive(Debug, Clone)]
pub struct BroadcastClient {
    http: HttpClient,
    url: String,
    retry: RetryConfig,
}

impl BroadcastClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            url: BROADCAST_URL.to_string(),
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

    pub async fn send(&self, access_token: &str, message: &str) -> Result<(), HttpError> {
        tracing::info!("Sending broadcast message via LINE Messaging API");

        let request = BroadcastRequest::text(message);
        self.retry
            .run("Send broadcast message", || {
                self.http.post_json(&self.url, &request, access_token)
            })
            .await?;

        tracing::info!("Broadcast message sent successfully");
        Ok(())
    }
}
