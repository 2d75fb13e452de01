//! Application services - Use case implementations

mod option_filter;
mod session_registry;
mod trip_exporter;
mod trip_planner;

pub use option_filter::{filter_indices, filter_options};
pub use session_registry::SessionRegistry;
pub use trip_exporter::TripExporter;
pub use trip_planner::{CommandOutcome, TripPlanner};
