//! Node key value object - identifies a (country, city) vertex of the route graph

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Separator between country and city in the textual `Country/City` form
pub const KEY_SEPARATOR: char = '/';

/// A normalized (country, city) pair
///
/// Both parts are trimmed of surrounding whitespace at construction; after
/// that, comparison is exact and case-sensitive. Ordering is by country,
/// then city, which gives the sorted listings shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawNodeKey")]
pub struct NodeKey {
    country: String,
    city: String,
}

#[derive(Deserialize)]
struct RawNodeKey {
    country: String,
    city: String,
}

impl From<RawNodeKey> for NodeKey {
    fn from(raw: RawNodeKey) -> Self {
        Self::new(raw.country, raw.city)
    }
}

impl NodeKey {
    /// Create a key, trimming both parts
    pub fn new(country: impl AsRef<str>, city: impl AsRef<str>) -> Self {
        Self {
            country: country.as_ref().trim().to_string(),
            city: city.as_ref().trim().to_string(),
        }
    }

    /// Parse the `Country/City` form used on the command line
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the separator is absent or either part
    /// is blank after trimming.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let (country, city) = input.split_once(KEY_SEPARATOR).ok_or_else(|| {
            DomainError::ValidationError(format!(
                "expected Country{KEY_SEPARATOR}City, got '{input}'"
            ))
        })?;
        let key = Self::new(country, city);
        if key.country.is_empty() || key.city.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "country and city must both be non-empty in '{input}'"
            )));
        }
        Ok(key)
    }

    /// The country part
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The city part
    pub fn city(&self) -> &str {
        &self.city
    }
}

impl FromStr for NodeKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}
