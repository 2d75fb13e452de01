//! Trip commands - Strongly typed representations of user intents

use serde::{Deserialize, Serialize};

use crate::value_objects::NodeKey;

/// Every command that drives a trip session
///
/// Each variant maps one-to-one onto a session operation; the presentation
/// layer produces them, the application layer executes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TripCommand {
    /// Select the starting city
    SetOrigin {
        /// City to start from
        origin: NodeKey,
    },

    /// Select the next destination, reached from the current origin
    AddLeg {
        /// City to travel to
        destination: NodeKey,
    },

    /// Lock the itinerary for export
    Finalize,

    /// Throw the itinerary away and start over
    Reset,
}

impl TripCommand {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Self::SetOrigin { origin } => format!("Start trip at {origin}"),
            Self::AddLeg { destination } => format!("Travel to {destination}"),
            Self::Finalize => "Finish trip".to_string(),
            Self::Reset => "Reset trip".to_string(),
        }
    }

    /// Short verb used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetOrigin { .. } => "set_origin",
            Self::AddLeg { .. } => "add_leg",
            Self::Finalize => "finalize",
            Self::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_names_the_city() {
        let cmd = TripCommand::AddLeg {
            destination: NodeKey::new("Germany", "Berlin"),
        };
        assert_eq!(cmd.description(), "Travel to Berlin, Germany");
    }

    #[test]
    fn command_serializes_to_tagged_json() {
        let json = serde_json::to_string(&TripCommand::Finalize).unwrap();
        assert_eq!(json, r#"{"type":"finalize"}"#);

        let parsed: TripCommand = serde_json::from_str(
            r#"{"type":"set_origin","origin":{"country":"France","city":" Paris"}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            TripCommand::SetOrigin {
                origin: NodeKey::new("France", "Paris")
            }
        );
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(TripCommand::Reset.name(), "reset");
        assert_eq!(
            TripCommand::SetOrigin {
                origin: NodeKey::new("a", "b")
            }
            .name(),
            "set_origin"
        );
    }
}
