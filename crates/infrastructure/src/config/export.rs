//! Trip export destination and format.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File format for exported trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One row per leg followed by the totals
    #[default]
    Csv,
    /// The full summary as a JSON document
    Json,
}

impl ExportFormat {
    /// Conventional file extension
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Invalid export format: {other}. Use 'csv' or 'json'")),
        }
    }
}

/// Where finalized trips are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output file
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Output format
    #[serde(default)]
    pub format: ExportFormat,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("finalized_trip.csv")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            format: ExportFormat::default(),
        }
    }
}
