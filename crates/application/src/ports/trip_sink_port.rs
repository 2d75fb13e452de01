//! Trip sink port
//!
//! Defines where a finalized trip summary is handed off to (a delimited
//! file, a JSON document, a terminal table).

use domain::TripSummary;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for writing a trip summary to an external sink
#[cfg_attr(test, automock)]
pub trait TripSinkPort: Send + Sync {
    /// Write the summary
    fn write_summary(&self, summary: &TripSummary) -> Result<(), ApplicationError>;

    /// Human-readable name of the destination, for logs and messages
    fn destination(&self) -> String;
}
