//! Error types for cloudacct-core

use thiserror::Error;

use crate::store::AccountStoreError;

/// Result type alias using cloudacct-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cloudacct-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Account store operation failed or was canceled
    #[error(transparent)]
    Store(#[from] AccountStoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Account not registered in the store
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Sync request could not be scheduled
    #[error("Sync scheduling error: {0}")]
    Sync(String),
}

impl Error {
    /// Whether this error is a user-initiated cancellation of a store flow.
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Store(AccountStoreError::Canceled))
    }
}
