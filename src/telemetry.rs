//! Tracing initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber per the logging config.
///
/// Idempotent: a second call (e.g. from tests) is a no-op rather than a
/// panic. An unparsable filter falls back to "info" with a warning after
/// init.
pub fn init(config: &LoggingConfig) {
    let (filter, filter_err) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err.to_string())),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(err) = result {
        tracing::debug!("tracing subscriber already installed: {err}");
    }
    if let Some(err) = filter_err {
        tracing::warn!(
            filter = %config.filter,
            "invalid log filter, using \"info\": {err}"
        );
    }
}
