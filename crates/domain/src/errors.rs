//! Domain-level errors

use std::fmt;

use thiserror::Error;

use crate::value_objects::NodeKey;

/// A single source row that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based position of the row in the source table (header excluded)
    pub row: usize,
    /// Names of the required columns the row does not supply
    pub missing: Vec<&'static str>,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: missing {}", self.row, self.missing.join(", "))
    }
}

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more edge rows are incomplete; no graph was built
    #[error("Invalid edge data: {} row(s) rejected ({})", .issues.len(), format_issues(.issues))]
    Data { issues: Vec<RowIssue> },

    /// The edge table lacks whole columns
    #[error("Edge table is missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// No edge connects the two nodes
    #[error("No route from {from} to {to}")]
    RouteNotFound { from: NodeKey, to: NodeKey },

    /// Operation is not legal in the current trip state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(reason: impl Into<String>) -> Self {
        Self::InvalidTransition(reason.into())
    }

    /// Whether the error stems from malformed source data
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::Data { .. } | Self::MissingColumns { .. })
    }

    /// Whether the caller can simply re-prompt and try again
    pub const fn is_recoverable(&self) -> bool {
        !self.is_data_error()
    }
}

fn format_issues(issues: &[RowIssue]) -> String {
    const SHOWN: usize = 5;

    let mut shown: Vec<String> = issues.iter().take(SHOWN).map(ToString::to_string).collect();
    if issues.len() > SHOWN {
        shown.push(format!("and {} more", issues.len() - SHOWN));
    }
    shown.join("; ")
}
