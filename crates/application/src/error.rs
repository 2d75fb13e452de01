//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The edge table could not be read
    #[error("Edge source error: {0}")]
    EdgeSource(String),

    /// The trip summary could not be written
    #[error("Export failed: {0}")]
    Export(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if the caller can re-prompt the user and carry on
    ///
    /// Bad source data and broken configuration are fatal; a rejected
    /// command or a failed export leaves the session intact.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Domain(err) => err.is_recoverable(),
            Self::Export(_) => true,
            Self::EdgeSource(_) | Self::Configuration(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_pass_through_transparently() {
        let err: ApplicationError = DomainError::invalid_transition("no legs to finalize").into();
        assert_eq!(err.to_string(), "Invalid transition: no legs to finalize");
        assert!(err.is_recoverable());
    }

    #[test]
    fn data_errors_are_fatal() {
        let err: ApplicationError = DomainError::MissingColumns {
            columns: vec!["City_to".to_string()],
        }
        .into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn export_errors_are_recoverable() {
        assert!(ApplicationError::Export("disk full".to_string()).is_recoverable());
        assert!(!ApplicationError::EdgeSource("gone".to_string()).is_recoverable());
    }
}
