//! Trip planner service
//!
//! Executes trip commands against a shared, read-only route graph and
//! answers the candidate queries the presentation layer needs to build its
//! pickers. Sessions are passed in by their owner; the planner keeps none.

use std::sync::Arc;

use domain::{
    DomainError, Edge, NodeKey, RouteGraph, Stop, TripCommand, TripSession, TripState,
};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::EdgeSourcePort};

/// What a successfully executed command did
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The trip now starts at `origin`
    OriginSet {
        origin: Stop,
        /// Number of legal next legs (zero means a dead end)
        candidates: usize,
    },
    /// `leg` was appended to the trip
    LegAdded { leg: Edge, candidates: usize },
    /// The trip is locked with `legs` legs
    Finalized { legs: usize },
    /// The trip was discarded
    Reset,
}

/// Command execution and candidate lookup over one route graph
#[derive(Debug, Clone)]
pub struct TripPlanner {
    graph: Arc<RouteGraph>,
}

impl TripPlanner {
    /// Create a planner over an existing graph
    #[must_use]
    pub const fn new(graph: Arc<RouteGraph>) -> Self {
        Self { graph }
    }

    /// Load the edge table from `source` and build the graph
    ///
    /// # Errors
    ///
    /// Returns the source's error if the table cannot be read, or
    /// `DomainError::Data` if any row is incomplete.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn from_source(source: &dyn EdgeSourcePort) -> Result<Self, ApplicationError> {
        let rows = source.load_rows()?;
        let row_count = rows.len();

        let graph = RouteGraph::from_rows(rows).inspect_err(|err| {
            warn!(rows = row_count, error = %err, "Rejected edge table");
        })?;

        let off_map = graph
            .edges()
            .iter()
            .filter(|edge| !edge.from_location.is_valid() || !edge.to_location.is_valid())
            .count();
        if off_map > 0 {
            warn!(edges = off_map, "Edges with out-of-range coordinates");
        }

        info!(
            edges = graph.len(),
            origins = graph.origin_count(),
            "Route graph built"
        );
        Ok(Self::new(Arc::new(graph)))
    }

    /// The underlying graph
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Apply one command to `session`
    ///
    /// Failures leave the session untouched.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the command is illegal in the session's
    /// state, `RouteNotFound` for an unknown leg, and `NotFound` for an
    /// origin that appears nowhere in the data.
    #[instrument(skip(self, session), fields(command = command.name()))]
    pub fn execute(
        &self,
        session: &mut TripSession,
        command: TripCommand,
    ) -> Result<CommandOutcome, ApplicationError> {
        let outcome = match command {
            TripCommand::SetOrigin { origin } => self.set_origin(session, origin)?,
            TripCommand::AddLeg { destination } => {
                let leg = session.add_leg(&self.graph, &destination)?.clone();
                let candidates = self.graph.nodes_from(&leg.to).len();
                debug!(from = %leg.from, to = %leg.to, km = leg.distance_km, "Leg added");
                if candidates == 0 {
                    warn!(stop = %leg.to, "No outbound routes from this stop");
                }
                CommandOutcome::LegAdded { leg, candidates }
            },
            TripCommand::Finalize => {
                session.finalize()?;
                info!(legs = session.legs().len(), "Trip finalized");
                CommandOutcome::Finalized {
                    legs: session.legs().len(),
                }
            },
            TripCommand::Reset => {
                session.reset();
                debug!("Trip reset");
                CommandOutcome::Reset
            },
        };
        Ok(outcome)
    }

    fn set_origin(
        &self,
        session: &mut TripSession,
        origin: NodeKey,
    ) -> Result<CommandOutcome, ApplicationError> {
        let state = session.state();
        if state != TripState::Empty {
            return Err(DomainError::invalid_transition(format!(
                "origin already set (session is {state})"
            ))
            .into());
        }

        let location = self
            .graph
            .location_of(&origin)
            .ok_or_else(|| DomainError::not_found("City", origin.to_string()))?;

        let candidates = session.set_origin(&self.graph, origin.clone(), location)?;
        if candidates == 0 {
            warn!(%origin, "No outbound routes from this starting city");
        } else {
            debug!(%origin, candidates, "Origin set");
        }

        Ok(CommandOutcome::OriginSet {
            origin: Stop::new(origin, location),
            candidates,
        })
    }

    /// Legs that may be added next, in source order
    ///
    /// Empty when no origin is set or the trip is finalized.
    pub fn candidates(&self, session: &TripSession) -> Vec<&Edge> {
        if !session.state().is_mutable() {
            return Vec::new();
        }
        session
            .current_origin()
            .map(|stop| self.graph.nodes_from(&stop.key))
            .unwrap_or_default()
    }

    /// Next-leg candidates restricted to one destination country
    pub fn candidates_in(&self, session: &TripSession, country: &str) -> Vec<&Edge> {
        let country = country.trim();
        self.candidates(session)
            .into_iter()
            .filter(|edge| edge.to.country() == country)
            .collect()
    }
}
