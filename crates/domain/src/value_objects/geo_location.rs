//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a location from data-set coordinates
    ///
    /// Values are taken as supplied; use [`GeoLocation::is_valid`] to check
    /// that they fall inside the usual degree ranges.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a location, rejecting out-of-range or non-finite values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let location = Self::new(latitude, longitude);
        if !location.is_valid() {
            return Err(DomainError::ValidationError(format!(
                "coordinates out of range: latitude {latitude} (expected -90 to 90), \
                 longitude {longitude} (expected -180 to 180)"
            )));
        }
        Ok(location)
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
