//! Error types for constructing a store.

use thiserror::Error;

/// Errors that can occur when building a [`Store`](crate::Store).
///
/// Cache operations themselves never fail; a miss is `None`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A sweep interval was configured but there is no Tokio runtime to run the sweeper on
    #[error(
        "background sweeping requires a Tokio runtime; create the store from within \
         a runtime context or use a zero sweep interval"
    )]
    NoRuntime,
}
