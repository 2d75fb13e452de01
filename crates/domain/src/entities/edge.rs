//! Edges of the route graph and the raw rows they are built from

use serde::{Deserialize, Serialize};

use crate::errors::RowIssue;
use crate::value_objects::{GeoLocation, NodeKey, Stop};

/// A directed, weighted connection between two cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Departure city
    pub from: NodeKey,
    /// Arrival city
    pub to: NodeKey,
    /// Coordinates of the departure city
    pub from_location: GeoLocation,
    /// Coordinates of the arrival city
    pub to_location: GeoLocation,
    /// Road distance in kilometers
    pub distance_km: f64,
    /// Road distance in miles
    pub distance_mi: f64,
}

impl Edge {
    /// Create an edge
    pub const fn new(
        from: NodeKey,
        to: NodeKey,
        from_location: GeoLocation,
        to_location: GeoLocation,
        distance_km: f64,
        distance_mi: f64,
    ) -> Self {
        Self {
            from,
            to,
            from_location,
            to_location,
            distance_km,
            distance_mi,
        }
    }

    /// The stop reached by travelling this edge
    pub fn arrival(&self) -> Stop {
        Stop::new(self.to.clone(), self.to_location)
    }

    /// The stop this edge departs from
    pub fn departure(&self) -> Stop {
        Stop::new(self.from.clone(), self.from_location)
    }

    /// Whether the edge starts and ends at the same city
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// One row of the source edge table, as handed over by a tabular reader
///
/// Every field is optional so that incomplete rows can be reported rather
/// than rejected by the reader itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeRow {
    pub country_from: Option<String>,
    pub city_from: Option<String>,
    pub lat_from: Option<f64>,
    pub long_from: Option<f64>,
    pub country_to: Option<String>,
    pub city_to: Option<String>,
    pub lat_to: Option<f64>,
    pub long_to: Option<f64>,
    pub distance_km: Option<f64>,
    pub distance_mi: Option<f64>,
}

impl EdgeRow {
    /// Column names of the source table, in canonical order
    pub const COLUMNS: [&'static str; 10] = [
        "Country_from",
        "City_from",
        "Lat_from",
        "Long_from",
        "Country_to",
        "City_to",
        "Lat_to",
        "Long_to",
        "Distance_km",
        "Distance_mi",
    ];

    /// Names of the columns this row does not supply
    ///
    /// Text fields that are blank after trimming and numbers that are not
    /// finite count as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let number = |v: &Option<f64>| v.is_some_and(f64::is_finite);

        let present = [
            text(&self.country_from),
            text(&self.city_from),
            number(&self.lat_from),
            number(&self.long_from),
            text(&self.country_to),
            text(&self.city_to),
            number(&self.lat_to),
            number(&self.long_to),
            number(&self.distance_km),
            number(&self.distance_mi),
        ];

        Self::COLUMNS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Convert into an edge, or describe what is missing
    ///
    /// `row` is the 1-based row number used in the report.
    pub fn into_edge(self, row: usize) -> Result<Edge, RowIssue> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(RowIssue { row, missing });
        }

        let Self {
            country_from: Some(country_from),
            city_from: Some(city_from),
            lat_from: Some(lat_from),
            long_from: Some(long_from),
            country_to: Some(country_to),
            city_to: Some(city_to),
            lat_to: Some(lat_to),
            long_to: Some(long_to),
            distance_km: Some(distance_km),
            distance_mi: Some(distance_mi),
        } = self
        else {
            return Err(RowIssue { row, missing });
        };

        Ok(Edge::new(
            NodeKey::new(country_from, city_from),
            NodeKey::new(country_to, city_to),
            GeoLocation::new(lat_from, long_from),
            GeoLocation::new(lat_to, long_to),
            distance_km,
            distance_mi,
        ))
    }
}
