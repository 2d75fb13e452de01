//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod csv_edge_source;
mod csv_trip_sink;
mod json_trip_sink;

use std::path::Path;

use application::ports::TripSinkPort;

pub use csv_edge_source::{CsvEdgeSource, read_edge_rows};
pub use csv_trip_sink::{CsvTripSink, TRIP_HEADER, write_trip_csv};
pub use json_trip_sink::JsonTripSink;

use crate::config::ExportFormat;

/// Build the sink for `format` writing to `path`
pub fn create_sink(format: ExportFormat, path: &Path) -> Box<dyn TripSinkPort> {
    match format {
        ExportFormat::Csv => Box::new(CsvTripSink::new(path)),
        ExportFormat::Json => Box::new(JsonTripSink::new(path)),
    }
}
