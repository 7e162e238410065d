//! Thin reqwest wrapper that turns every failure into a tagged [`HttpError`].

use std::error::Error as _;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{HttpError, NetworkErrorKind};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        let inner = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { inner }
    }
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    /// GET `url` with `query` and decode a JSON body.
    ///
    /// Errors mention `url` only, never the query string, so API keys stay
    /// out of logs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HttpError> {
        let res = self
            .inner
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let body = success_body(url, res).await?;

        serde_json::from_str(&body).map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// POST `body` as JSON with a bearer token. Any 2xx counts as success and
    /// the response body is discarded.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer_token: &str,
    ) -> Result<(), HttpError> {
        let res = self
            .inner
            .post(url)
            .bearer_auth(bearer_token)
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        success_body(url, res).await.map(|_| ())
    }
}

async fn success_body(url: &str, res: Response) -> Result<String, HttpError> {
    let status = res.status();
    let body = res.text().await.map_err(|e| network_error(url, &e))?;

    if !status.is_success() {
        return Err(HttpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

fn network_error(url: &str, err: &reqwest::Error) -> HttpError {
    HttpError::Network {
        url: url.to_string(),
        kind: classify_network_error(err),
        message: err.to_string(),
    }
}

fn classify_network_error(err: &reqwest::Error) -> NetworkErrorKind {
    if err.is_timeout() {
        return NetworkErrorKind::TimedOut;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            match io.kind() {
                std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::BrokenPipe => return NetworkErrorKind::ConnectionReset,
                std::io::ErrorKind::TimedOut => return NetworkErrorKind::TimedOut,
                _ => {}
            }
        }
        source = cause.source();
    }

    NetworkErrorKind::Other
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
