//! Application configuration
//!
//! Split into focused sub-modules:
//! - `data`: edge table path and delimiter
//! - `export`: output path and format for finalized trips
//! - `logging`: log filter and line format
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `ROUTEPICKER__*` environment variables (e.g. `ROUTEPICKER__DATA__EDGES_PATH`).

mod data;
mod export;
mod logging;

use std::path::Path;

use application::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use data::DataConfig;
pub use export::{ExportConfig, ExportFormat};
pub use logging::{LogFormat, LoggingConfig};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "routepicker";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ROUTEPICKER";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Edge table configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Trip export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a config file, and the environment
    ///
    /// With `path` the file must exist; without it `routepicker.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ApplicationError> {
        let file = path.map_or_else(
            || config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
            |path| config::File::from(path).required(true),
        );

        let config = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., ROUTEPICKER__EXPORT__FORMAT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        loaded.validate()?;

        debug!(
            edges = %loaded.data.edges_path.display(),
            output = %loaded.export.output_path.display(),
            format = %loaded.export.format,
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.data.delimiter_byte().is_none() {
            return Err(ApplicationError::Configuration(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.data.delimiter
            )));
        }
        if self.data.edges_path.as_os_str().is_empty() {
            return Err(ApplicationError::Configuration(
                "data.edges_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
