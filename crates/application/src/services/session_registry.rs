//! Per-traveler trip sessions
//!
//! Each traveler gets an isolated session; nothing is shared between them
//! except the read-only graph the planner holds.

use std::collections::HashMap;

use domain::{TravelerId, TripSession};
use parking_lot::Mutex;
use tracing::debug;

/// In-memory store of one trip session per traveler
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<TravelerId, TripSession>>,
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session and return its traveler id
    pub fn open(&self) -> TravelerId {
        let id = TravelerId::random();
        self.sessions.lock().insert(id, TripSession::new());
        debug!(traveler = %id, "Session opened");
        id
    }

    /// Run `f` against the traveler's session, creating it on first use
    ///
    /// The registry lock is held for the duration of `f`.
    pub fn with_session<R>(&self, id: TravelerId, f: impl FnOnce(&mut TripSession) -> R) -> R {
        let mut sessions = self.sessions.lock();
        let session = sessions.entry(id).or_default();
        f(session)
    }

    /// Copy of the traveler's current session, if any
    pub fn snapshot(&self, id: TravelerId) -> Option<TripSession> {
        self.sessions.lock().get(&id).cloned()
    }

    /// Drop the traveler's session, returning it
    pub fn end(&self, id: TravelerId) -> Option<TripSession> {
        let removed = self.sessions.lock().remove(&id);
        if removed.is_some() {
            debug!(traveler = %id, "Session ended");
        }
        removed
    }

    /// Number of open sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no sessions are open
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use domain::{Edge, GeoLocation, NodeKey, RouteGraph, TripState};

    use super::*;

    fn graph() -> RouteGraph {
        RouteGraph::from_edges(vec![Edge::new(
            NodeKey::new("France", "Paris"),
            NodeKey::new("Belgium", "Brussels"),
            GeoLocation::new(48.8566, 2.3522),
            GeoLocation::new(50.8503, 4.3517),
            264.0,
            164.0,
        )])
    }

    #[test]
    fn open_creates_empty_session() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let id = registry.open();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.snapshot(id).map(|s| s.state()),
            Some(TripState::Empty)
        );
    }

    #[test]
    fn sessions_are_isolated() {
        let graph = graph();
        let registry = SessionRegistry::new();
        let alice = registry.open();
        let bob = registry.open();

        registry
            .with_session(alice, |session| {
                session.set_origin(
                    &graph,
                    NodeKey::new("France", "Paris"),
                    GeoLocation::new(48.8566, 2.3522),
                )
            })
            .unwrap();

        assert_eq!(
            registry.snapshot(alice).map(|s| s.state()),
            Some(TripState::Building)
        );
        assert_eq!(
            registry.snapshot(bob).map(|s| s.state()),
            Some(TripState::Empty)
        );
    }

    #[test]
    fn with_session_creates_on_first_use() {
        let registry = SessionRegistry::new();
        let id = TravelerId::random();
        let stops = registry.with_session(id, |session| session.stops().len());
        assert_eq!(stops, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn end_removes_session() {
        let registry = SessionRegistry::new();
        let id = registry.open();
        assert!(registry.end(id).is_some());
        assert!(registry.end(id).is_none());
        assert!(registry.snapshot(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_travelers() {
        let graph = Arc::new(graph());
        let registry = Arc::new(SessionRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let graph = Arc::clone(&graph);
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let id = registry.open();
                    registry
                        .with_session(id, |session| {
                            session.set_origin(
                                &graph,
                                NodeKey::new("France", "Paris"),
                                GeoLocation::new(48.8566, 2.3522),
                            )?;
                            session.add_leg(&graph, &NodeKey::new("Belgium", "Brussels"))?;
                            session.finalize()
                        })
                        .unwrap();
                    id
                })
            })
            .collect();

        for handle in handles {
            let id = handle.join().unwrap();
            let session = registry.snapshot(id).unwrap();
            assert!(session.is_finalized());
            assert_eq!(session.legs().len(), 1);
        }
        assert_eq!(registry.len(), 8);
    }
}
