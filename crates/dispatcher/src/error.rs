//! Dispatch error types.

use thiserror::Error;

/// Errors that can occur while dispatching a signal.
///
/// Per-number placement failures are not errors at this level; they are
/// recorded in the call attempt log and the broadcast continues. Only
/// persistence failures abort a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Persistence failure while resolving subscribers or logging attempts.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),
}
