//! Logging setup
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus a text or
//! JSON formatting layer writing to stderr so that command output on stdout
//! stays clean.

use application::ApplicationError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter for `config`, rejecting malformed directives
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ApplicationError> {
    EnvFilter::try_new(&config.filter).map_err(|e| {
        ApplicationError::Configuration(format!("invalid log filter '{}': {e}", config.filter))
    })
}

/// Install the global subscriber
///
/// Fails if the filter is malformed or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApplicationError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| ApplicationError::Configuration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_targeted_directives() {
        for filter in ["warn", "info,application=debug", "trace"] {
            let config = LoggingConfig {
                filter: filter.to_string(),
                format: LogFormat::Text,
            };
            assert!(build_filter(&config).is_ok(), "{filter}");
        }
    }

    #[test]
    fn rejects_malformed_directive() {
        let config = LoggingConfig {
            filter: "application=notalevel".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            build_filter(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }
}
