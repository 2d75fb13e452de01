//! Stop value object - a waypoint actually visited on a trip

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GeoLocation, NodeKey};

/// A visited waypoint, the origin included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Which city this is
    pub key: NodeKey,
    /// Where it is
    pub location: GeoLocation,
}

impl Stop {
    /// Create a stop
    pub const fn new(key: NodeKey, location: GeoLocation) -> Self {
        Self { key, location }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_key_and_location() {
        let stop = Stop::new(NodeKey::new("France", "Paris"), GeoLocation::new(48.8566, 2.3522));
        assert_eq!(stop.to_string(), "Paris, France (48.8566, 2.3522)");
    }
}
