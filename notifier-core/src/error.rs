//! Error types shared by every outbound call.
//!
//! HTTP failures are returned as a tagged [`HttpError`] rather than probed for
//! status fields, so retry classification is a plain `match`.

use thiserror::Error;

/// Well-known network failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    ConnectionReset,
    TimedOut,
    Other,
}

impl NetworkErrorKind {
    /// Conventional identifier for the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            NetworkErrorKind::ConnectionReset => "ECONNRESET",
            NetworkErrorKind::TimedOut => "ETIMEDOUT",
            NetworkErrorKind::Other => "ENETWORK",
        }
    }
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of a failed HTTP exchange.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// No usable response was received.
    #[error("request to {url} failed ({kind}): {message}")]
    Network {
        url: String,
        kind: NetworkErrorKind,
        message: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to resolve a named secret.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Parameter {name} not found")]
    NotFound { name: String },

    #[error("failed to read parameter {name}: {message}")]
    Backend { name: String, message: String },
}

/// Top-level error for a notifier invocation.
///
/// Wrapped variants carry the original error untouched so callers can still
/// match on, for example, the HTTP status of a rejected broadcast.
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    /// The upstream response was well-formed JSON but lacked required data.
    #[error("{0}")]
    MissingData(String),
}

/// Classifies a failure as transient (worth retrying) or terminal.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            HttpError::Status { status, .. } => (500..600).contains(status),
            HttpError::Network { kind, .. } => matches!(
                kind,
                NetworkErrorKind::ConnectionReset | NetworkErrorKind::TimedOut
            ),
            HttpError::Decode { .. } => false,
        }
    }
}

impl Retryable for NotifierError {
    fn is_retryable(&self) -> bool {
        match self {
            NotifierError::Http(e) => e.is_retryable(),
            NotifierError::Secret(_) | NotifierError::MissingData(_) => false,
        }
    }
}
