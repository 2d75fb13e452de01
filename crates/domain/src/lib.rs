//! Domain layer for the route picker
//!
//! Contains the route graph, the trip session state machine, value objects,
//! and domain errors. This layer performs no I/O.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use commands::TripCommand;
pub use entities::*;
pub use errors::{DomainError, RowIssue};
pub use value_objects::*;
