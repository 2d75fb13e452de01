//! Edge source port
//!
//! Defines how the application obtains the raw edge table. Adapters in the
//! infrastructure layer read it from files; the application never parses
//! files itself.

use domain::EdgeRow;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading the route edge table
#[cfg_attr(test, automock)]
pub trait EdgeSourcePort: Send + Sync {
    /// Read every row of the table in source order
    ///
    /// Incomplete rows are returned as-is (with `None` fields) so that graph
    /// construction can report all of them at once.
    fn load_rows(&self) -> Result<Vec<EdgeRow>, ApplicationError>;

    /// Human-readable name of the source, for logs and messages
    fn describe(&self) -> String;
}
