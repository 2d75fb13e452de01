//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the CSV edge source,
//! CSV and JSON trip sinks, configuration loading, and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DataConfig, ExportConfig, ExportFormat, LogFormat, LoggingConfig};
pub use telemetry::{build_filter, init_logging};
