//! Domain entities - Objects with identity and lifecycle

mod edge;
mod route_graph;
mod trip_session;
mod trip_summary;

pub use edge::{Edge, EdgeRow};
pub use route_graph::RouteGraph;
pub use trip_session::{TripSession, TripState};
pub use trip_summary::{LegSummary, TripSummary};
