//! JSON-lines logging.
//!
//! Every event is one JSON object per line with `timestamp`, `level` and
//! `message`, plus the event's own fields at the top level.

use std::error::Error;

use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Install the JSON subscriber globally, filtered by `RUST_LOG` (default `info`).
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing::subscriber::set_global_default(json_subscriber(filter, std::io::stdout))
        .context("Failed to install the log subscriber")
}

/// The subscriber [`init`] installs, writing to `writer`.
pub fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// The error followed by its `source()` chain, one cause per line.
pub fn error_stack(err: &(dyn Error + 'static)) -> String {
    let mut stack = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        stack.push_str("\ncaused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }
    stack
}

/// Log `err` at error level with `error` and `stack` fields.
pub fn log_error(message: &str, err: &(dyn Error + 'static)) {
    tracing::error!(error = %err, stack = %error_stack(err), "{message}");
}


#[cfg(test)]
mod tests {
    use super::capture::Capture;
    use super::*;
    use crate::error::HttpError;
    use serde_json::Value;

    fn capture(f: impl FnOnce()) -> Vec<Value> {
        let out = Capture::default();
        tracing::subscriber::with_default(out.subscriber(), f);
        out.entries()
    }

    #[test]
    fn entries_carry_timestamp_level_message_and_fields() {
        let entries = capture(|| {
            tracing::info!(count = 3, "Filtered today hours");
            tracing::warn!("Fetch failed, retrying in 1000ms");
        });

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["level"], "INFO");
        assert_eq!(entries[0]["message"], "Filtered today hours");
        assert_eq!(entries[0]["count"], 3);
        assert!(entries[0]["timestamp"].as_str().is_some_and(|t| t.contains('T')));
        assert_eq!(entries[1]["level"], "WARN");
    }

    #[test]
    fn error_entries_include_error_and_stack() {
        let source = serde_json::from_str::<Value>("{").unwrap_err();
        let err = HttpError::Decode {
            url: "https://api.example.test".into(),
            source,
        };

        let entries = capture(|| log_error("Weather notification failed", &err));

        assert_eq!(entries[0]["level"], "ERROR");
        assert_eq!(entries[0]["message"], "Weather notification failed");
        assert_eq!(entries[0]["error"], err.to_string());
        let stack = entries[0]["stack"].as_str().unwrap();
        assert!(stack.starts_with(&err.to_string()));
        assert!(stack.contains("caused by: EOF"));
    }

    #[test]
    fn debug_entries_are_filtered_by_default() {
        let entries = capture(|| tracing::debug!("noise"));
        assert!(entries.is_empty());
    }
}
