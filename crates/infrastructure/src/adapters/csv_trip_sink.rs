//! CSV trip sink adapter
//!
//! Writes one row per leg under a fixed header, then the two totals rows.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::TripSinkPort};
use csv::WriterBuilder;
use domain::TripSummary;
use tracing::{debug, instrument};

/// Header row of an exported trip
pub const TRIP_HEADER: [&str; 6] = [
    "Country_from",
    "City_from",
    "Country_to",
    "City_to",
    "Distance_km",
    "Distance_mi",
];

/// Trip sink writing a CSV file
#[derive(Debug, Clone)]
pub struct CsvTripSink {
    path: PathBuf,
}

impl CsvTripSink {
    /// Sink writing to `path`, replacing any existing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `summary` as CSV to any writer
pub fn write_trip_csv<W: io::Write>(writer: W, summary: &TripSummary) -> Result<(), csv::Error> {
    // Totals rows are shorter than leg rows
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(TRIP_HEADER)?;
    for leg in &summary.legs {
        wtr.write_record([
            leg.from.country(),
            leg.from.city(),
            leg.to.country(),
            leg.to.city(),
            leg.distance_km.to_string().as_str(),
            leg.distance_mi.to_string().as_str(),
        ])?;
    }
    wtr.write_record(["Total_km", summary.total_km.to_string().as_str()])?;
    wtr.write_record(["Total_mi", summary.total_mi.to_string().as_str()])?;
    wtr.flush()?;
    Ok(())
}

impl TripSinkPort for CsvTripSink {
    #[instrument(skip(self, summary), fields(path = %self.path.display(), legs = summary.leg_count()))]
    fn write_summary(&self, summary: &TripSummary) -> Result<(), ApplicationError> {
        let file = File::create(&self.path).map_err(|e| {
            ApplicationError::Export(format!("cannot create {}: {e}", self.path.display()))
        })?;
        write_trip_csv(io::BufWriter::new(file), summary)
            .map_err(|e| ApplicationError::Export(format!("{}: {e}", self.path.display())))?;
        debug!("Trip written as CSV");
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
