//! Trip session entity - the itinerary-in-progress state machine

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Edge, RouteGraph};
use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, NodeKey, Stop};

/// Lifecycle state of a trip session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripState {
    /// No origin chosen yet
    Empty,
    /// Origin chosen, legs may be added
    Building,
    /// Locked for export
    Finalized,
}

impl TripState {
    /// Whether stops and legs may still change (short of a reset)
    pub const fn is_mutable(&self) -> bool {
        !matches!(self, Self::Finalized)
    }
}

impl fmt::Display for TripState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Building => write!(f, "building"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

/// One itinerary being assembled leg by leg
///
/// The current origin is always the last stop; there is no separate field
/// for it. Once an origin is set, `stops.len() == legs.len() + 1` holds, and
/// every failed operation leaves the session exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSession {
    stops: Vec<Stop>,
    legs: Vec<Edge>,
    finalized_at: Option<DateTime<Utc>>,
}

impl TripSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> TripState {
        if self.finalized_at.is_some() {
            TripState::Finalized
        } else if self.stops.is_empty() {
            TripState::Empty
        } else {
            TripState::Building
        }
    }

    /// Visited stops, origin first
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Accepted legs in travel order
    pub fn legs(&self) -> &[Edge] {
        &self.legs
    }

    /// Whether the trip has been locked
    pub const fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    /// When the trip was locked
    pub const fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    /// The stop the next leg departs from
    pub fn current_origin(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Choose the starting city
    ///
    /// The origin need not have outbound edges; the returned count of legal
    /// continuations is zero for such a dead end.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the session is empty.
    pub fn set_origin(
        &mut self,
        graph: &RouteGraph,
        key: NodeKey,
        location: GeoLocation,
    ) -> Result<usize, DomainError> {
        if self.state() != TripState::Empty {
            return Err(DomainError::invalid_transition(format!(
                "origin already set (session is {})",
                self.state()
            )));
        }
        let continuations = graph.nodes_from(&key).len();
        self.stops = vec![Stop::new(key, location)];
        self.legs.clear();
        Ok(continuations)
    }

    /// Travel from the current origin to `destination`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the session is building, and
    /// `RouteNotFound` if the graph has no edge from the current origin to
    /// `destination`.
    pub fn add_leg(
        &mut self,
        graph: &RouteGraph,
        destination: &NodeKey,
    ) -> Result<&Edge, DomainError> {
        let origin = match (self.state(), self.stops.last()) {
            (TripState::Building, Some(origin)) => origin,
            (state, _) => {
                return Err(DomainError::invalid_transition(format!(
                    "cannot add a leg while session is {state}"
                )));
            },
        };

        let edge = graph.find_edge(&origin.key, destination)?.clone();
        self.stops.push(edge.arrival());
        self.legs.push(edge);
        Ok(&self.legs[self.legs.len() - 1])
    }

    /// Lock the itinerary
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the session is building with at
    /// least one leg.
    pub fn finalize(&mut self) -> Result<(), DomainError> {
        match self.state() {
            TripState::Building if !self.legs.is_empty() => {
                self.finalized_at = Some(Utc::now());
                Ok(())
            },
            TripState::Building | TripState::Empty => {
                Err(DomainError::invalid_transition("no legs to finalize"))
            },
            TripState::Finalized => Err(DomainError::invalid_transition("trip already finalized")),
        }
    }

    /// Discard everything and return to the empty state
    pub fn reset(&mut self) {
        self.stops.clear();
        self.legs.clear();
        self.finalized_at = None;
    }
}
