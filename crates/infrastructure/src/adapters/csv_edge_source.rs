//! CSV edge source adapter
//!
//! Reads the route edge table from a delimited text file with a header row.
//! Column order is free and extra columns are ignored; every required
//! column must be present in the header.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::EdgeSourcePort};
use csv::{ReaderBuilder, StringRecord, Trim};
use domain::{DomainError, EdgeRow};
use serde::Deserialize;
use tracing::{debug, instrument};

/// One raw table row as it appears in the file
///
/// Blank cells and unparseable numbers come through as `None`; graph
/// construction decides what is missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvEdgeRecord {
    #[serde(rename = "Country_from")]
    country_from: Option<String>,
    #[serde(rename = "City_from")]
    city_from: Option<String>,
    #[serde(rename = "Lat_from", deserialize_with = "csv::invalid_option")]
    lat_from: Option<f64>,
    #[serde(rename = "Long_from", deserialize_with = "csv::invalid_option")]
    long_from: Option<f64>,
    #[serde(rename = "Country_to")]
    country_to: Option<String>,
    #[serde(rename = "City_to")]
    city_to: Option<String>,
    #[serde(rename = "Lat_to", deserialize_with = "csv::invalid_option")]
    lat_to: Option<f64>,
    #[serde(rename = "Long_to", deserialize_with = "csv::invalid_option")]
    long_to: Option<f64>,
    #[serde(rename = "Distance_km", deserialize_with = "csv::invalid_option")]
    distance_km: Option<f64>,
    #[serde(rename = "Distance_mi", deserialize_with = "csv::invalid_option")]
    distance_mi: Option<f64>,
}

impl From<CsvEdgeRecord> for EdgeRow {
    fn from(record: CsvEdgeRecord) -> Self {
        Self {
            country_from: record.country_from,
            city_from: record.city_from,
            lat_from: record.lat_from,
            long_from: record.long_from,
            country_to: record.country_to,
            city_to: record.city_to,
            lat_to: record.lat_to,
            long_to: record.long_to,
            distance_km: record.distance_km,
            distance_mi: record.distance_mi,
        }
    }
}

/// Edge source backed by a delimited file
#[derive(Debug, Clone)]
pub struct CsvEdgeSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvEdgeSource {
    /// Comma-separated file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Use a different field delimiter
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The file this source reads
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read every row from `reader`
///
/// # Errors
///
/// `DomainError::MissingColumns` when the header lacks required columns,
/// `EdgeSource` when the text itself cannot be read.
pub fn read_edge_rows<R: io::Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<EdgeRow>, ApplicationError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| source_error(&e))?.clone();
    check_columns(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.deserialize::<CsvEdgeRecord>() {
        rows.push(EdgeRow::from(result.map_err(|e| source_error(&e))?));
    }
    Ok(rows)
}

fn check_columns(headers: &StringRecord) -> Result<(), DomainError> {
    let missing: Vec<String> = EdgeRow::COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::MissingColumns { columns: missing })
    }
}

fn source_error(err: &csv::Error) -> ApplicationError {
    let location = err
        .position()
        .map(|pos| format!(" at line {}", pos.line()))
        .unwrap_or_default();
    ApplicationError::EdgeSource(format!("{err}{location}"))
}

impl EdgeSourcePort for CsvEdgeSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_rows(&self) -> Result<Vec<EdgeRow>, ApplicationError> {
        let file = File::open(&self.path).map_err(|e| {
            ApplicationError::EdgeSource(format!("cannot open {}: {e}", self.path.display()))
        })?;
        let rows = read_edge_rows(io::BufReader::new(file), self.delimiter)?;
        debug!(rows = rows.len(), "Edge table read");
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
