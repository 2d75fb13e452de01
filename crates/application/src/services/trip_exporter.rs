//! Trip exporter
//!
//! Projects a finalized trip session into its flat summary and hands that
//! summary to a sink. Holds no state of its own.

use domain::{DomainError, TripSession, TripSummary};
use tracing::{info, instrument};

use crate::{error::ApplicationError, ports::TripSinkPort};

/// Stateless projection of finalized trips
#[derive(Debug, Clone, Copy, Default)]
pub struct TripExporter;

impl TripExporter {
    /// Create an exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Summarize a finalized session
    ///
    /// Pure and idempotent: repeated calls on the same session return equal
    /// summaries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the session has not been finalized.
    pub fn summarize(&self, session: &TripSession) -> Result<TripSummary, ApplicationError> {
        if !session.is_finalized() {
            return Err(DomainError::invalid_transition(format!(
                "cannot summarize a trip that is {}",
                session.state()
            ))
            .into());
        }
        Ok(TripSummary::from_legs(session.legs(), session.finalized_at()))
    }

    /// Summarize a finalized session and write it to `sink`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for unfinalized sessions, or whatever the
    /// sink reports.
    #[instrument(skip_all, fields(destination = %sink.destination()))]
    pub fn export(
        &self,
        session: &TripSession,
        sink: &dyn TripSinkPort,
    ) -> Result<TripSummary, ApplicationError> {
        let summary = self.summarize(session)?;
        sink.write_summary(&summary)?;
        info!(
            legs = summary.leg_count(),
            total_km = summary.total_km,
            total_mi = summary.total_mi,
            "Trip exported"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use domain::{Edge, GeoLocation, NodeKey, RouteGraph};

    use super::*;
    use crate::ports::MockTripSinkPort;

    fn paris() -> NodeKey {
        NodeKey::new("France", "Paris")
    }

    fn amsterdam() -> NodeKey {
        NodeKey::new("Netherlands", "Amsterdam")
    }

    fn berlin() -> NodeKey {
        NodeKey::new("Germany", "Berlin")
    }

    fn graph() -> RouteGraph {
        RouteGraph::from_edges(vec![
            Edge::new(
                paris(),
                amsterdam(),
                GeoLocation::new(48.8566, 2.3522),
                GeoLocation::new(52.3676, 4.9041),
                507.0,
                315.0,
            ),
            Edge::new(
                amsterdam(),
                berlin(),
                GeoLocation::new(52.3676, 4.9041),
                GeoLocation::new(52.52, 13.405),
                577.0,
                359.0,
            ),
        ])
    }

    fn finalized_trip(graph: &RouteGraph) -> TripSession {
        let mut session = TripSession::new();
        session
            .set_origin(graph, paris(), GeoLocation::new(48.8566, 2.3522))
            .unwrap();
        session.add_leg(graph, &amsterdam()).unwrap();
        session.add_leg(graph, &berlin()).unwrap();
        session.finalize().unwrap();
        session
    }

    #[test]
    fn summarize_paris_amsterdam_berlin() {
        let graph = graph();
        let session = finalized_trip(&graph);

        let summary = TripExporter::new().summarize(&session).unwrap();

        assert_eq!(summary.leg_count(), 2);
        assert_eq!(summary.legs[0].from, paris());
        assert_eq!(summary.legs[1].to, berlin());
        assert!((summary.total_km - 1084.0).abs() < f64::EPSILON);
        assert!((summary.total_mi - 674.0).abs() < f64::EPSILON);
        assert_eq!(summary.finalized_at, session.finalized_at());
    }

    #[test]
    fn summarize_is_idempotent() {
        let graph = graph();
        let session = finalized_trip(&graph);
        let exporter = TripExporter::new();
        assert_eq!(
            exporter.summarize(&session).unwrap(),
            exporter.summarize(&session).unwrap()
        );
    }

    #[test]
    fn summarize_rejects_unfinalized_session() {
        let graph = graph();
        let mut session = TripSession::new();
        assert!(matches!(
            TripExporter::new().summarize(&session),
            Err(ApplicationError::Domain(DomainError::InvalidTransition(_)))
        ));

        session
            .set_origin(&graph, paris(), GeoLocation::new(48.8566, 2.3522))
            .unwrap();
        session.add_leg(&graph, &amsterdam()).unwrap();
        let err = TripExporter::new().summarize(&session).unwrap_err();
        assert!(err.to_string().contains("building"));
    }

    #[test]
    fn export_writes_summary_to_sink() {
        let graph = graph();
        let session = finalized_trip(&graph);

        let mut sink = MockTripSinkPort::new();
        sink.expect_destination()
            .returning(|| "memory".to_string());
        sink.expect_write_summary()
            .withf(|summary| summary.leg_count() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let summary = TripExporter::new().export(&session, &sink).unwrap();
        assert!((summary.total_km - 1084.0).abs() < f64::EPSILON);
    }

    #[test]
    fn export_does_not_touch_sink_for_unfinalized_session() {
        let mut sink = MockTripSinkPort::new();
        sink.expect_destination()
            .returning(|| "memory".to_string());
        sink.expect_write_summary().times(0);

        assert!(
            TripExporter::new()
                .export(&TripSession::new(), &sink)
                .is_err()
        );
    }

    #[test]
    fn export_propagates_sink_failure() {
        let graph = graph();
        let session = finalized_trip(&graph);

        let mut sink = MockTripSinkPort::new();
        sink.expect_destination()
            .returning(|| "/readonly/trip.csv".to_string());
        sink.expect_write_summary()
            .returning(|_| Err(ApplicationError::Export("permission denied".to_string())));

        let err = TripExporter::new().export(&session, &sink).unwrap_err();
        assert!(matches!(err, ApplicationError::Export(_)));
    }
}
