//! Application layer - Use cases and orchestration
//!
//! Runs trip commands against the route graph, keeps per-traveler sessions,
//! and exports finalized trips through the sink port. Infrastructure
//! adapters plug in through the ports defined here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
