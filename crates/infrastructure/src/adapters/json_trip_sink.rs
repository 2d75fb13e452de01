//! JSON trip sink adapter

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::TripSinkPort};
use domain::TripSummary;
use tracing::{debug, instrument};

/// Trip sink writing the summary as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonTripSink {
    path: PathBuf,
}

impl JsonTripSink {
    /// Sink writing to `path`, replacing any existing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn export_error(&self, err: impl fmt::Display) -> ApplicationError {
        ApplicationError::Export(format!("{}: {err}", self.path.display()))
    }
}

impl TripSinkPort for JsonTripSink {
    #[instrument(skip(self, summary), fields(path = %self.path.display(), legs = summary.leg_count()))]
    fn write_summary(&self, summary: &TripSummary) -> Result<(), ApplicationError> {
        let file = File::create(&self.path).map_err(|e| self.export_error(e))?;
        let mut writer = io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| self.export_error(e))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| self.export_error(e))?;

        debug!("Trip written as JSON");
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_path_is_export_error() {
        let sink = JsonTripSink::new("/nonexistent/dir/trip.json");
        let summary = TripSummary {
            legs: Vec::new(),
            total_km: 0.0,
            total_mi: 0.0,
            finalized_at: None,
        };
        let err = sink.write_summary(&summary).unwrap_err();
        assert!(matches!(err, ApplicationError::Export(_)));
        assert!(err.to_string().contains("/nonexistent/dir/trip.json"));
    }
}
