//! Edge table location and format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the route edge table is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the delimited edge table
    #[serde(default = "default_edges_path")]
    pub edges_path: PathBuf,

    /// Field delimiter (a single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_edges_path() -> PathBuf {
    PathBuf::from("Files/Euro_city.csv")
}

const fn default_delimiter() -> char {
    ','
}

impl DataConfig {
    /// The delimiter as the byte the CSV reader expects
    ///
    /// `None` when the configured delimiter is not ASCII.
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter).ok().filter(u8::is_ascii)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            edges_path: default_edges_path(),
            delimiter: default_delimiter(),
        }
    }
}
