//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod node_key;
mod stop;
mod traveler_id;

pub use geo_location::GeoLocation;
pub use node_key::{KEY_SEPARATOR, NodeKey};
pub use stop::Stop;
pub use traveler_id::TravelerId;
