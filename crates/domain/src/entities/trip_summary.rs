//! Trip summary - the flat, exportable view of a finalized trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Edge;
use crate::value_objects::NodeKey;

/// One leg as it appears in the exported table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegSummary {
    pub from: NodeKey,
    pub to: NodeKey,
    pub distance_km: f64,
    pub distance_mi: f64,
}

impl From<&Edge> for LegSummary {
    fn from(edge: &Edge) -> Self {
        Self {
            from: edge.from.clone(),
            to: edge.to.clone(),
            distance_km: edge.distance_km,
            distance_mi: edge.distance_mi,
        }
    }
}

/// Ordered legs plus exact (unrounded) distance totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub legs: Vec<LegSummary>,
    pub total_km: f64,
    pub total_mi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl TripSummary {
    /// Summarize legs in the given order
    pub fn from_legs(legs: &[Edge], finalized_at: Option<DateTime<Utc>>) -> Self {
        let legs: Vec<LegSummary> = legs.iter().map(LegSummary::from).collect();
        let total_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
        let total_mi: f64 = legs.iter().map(|leg| leg.distance_mi).sum();
        Self {
            legs,
            total_km,
            total_mi,
            finalized_at,
        }
    }

    /// Number of legs
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Stops in travel order, derived from the legs
    pub fn route(&self) -> Vec<&NodeKey> {
        self.legs
            .first()
            .map(|first| &first.from)
            .into_iter()
            .chain(self.legs.iter().map(|leg| &leg.to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::GeoLocation;

    fn edge(from: &str, to: &str, km: f64, mi: f64) -> Edge {
        Edge::new(
            NodeKey::new("X", from),
            NodeKey::new("X", to),
            GeoLocation::new(0.0, 0.0),
            GeoLocation::new(0.0, 0.0),
            km,
            mi,
        )
    }

    #[test]
    fn totals_are_exact_sums() {
        let summary = TripSummary::from_legs(
            &[edge("A", "B", 507.0, 315.0), edge("B", "C", 577.0, 359.0)],
            None,
        );
        assert!((summary.total_km - 1084.0).abs() < f64::EPSILON);
        assert!((summary.total_mi - 674.0).abs() < f64::EPSILON);
        assert_eq!(summary.leg_count(), 2);
    }

    #[test]
    fn fractional_distances_are_not_rounded() {
        let summary = TripSummary::from_legs(&[edge("A", "B", 0.25, 0.125), edge("B", "C", 0.5, 0.25)], None);
        assert!((summary.total_km - 0.75).abs() < f64::EPSILON);
        assert!((summary.total_mi - 0.375).abs() < f64::EPSILON);
    }

    #[test]
    fn route_lists_every_stop_once() {
        let summary = TripSummary::from_legs(
            &[edge("A", "B", 1.0, 1.0), edge("B", "C", 1.0, 1.0)],
            None,
        );
        let cities: Vec<&str> = summary.route().into_iter().map(NodeKey::city).collect();
        assert_eq!(cities, vec!["A", "B", "C"]);
    }

    #[test]
    fn serializes_without_timestamp_when_absent() {
        let summary = TripSummary::from_legs(&[edge("A", "B", 1.0, 2.0)], None);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""total_km":1.0"#));
        assert!(!json.contains("finalized_at"));
    }
}
