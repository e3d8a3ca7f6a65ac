//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the chain lock.
    #[error("chain lock poisoned")]
    LockPoisoned,

    /// The stored chain is in a state the store cannot serve.
    #[error("corrupted chain: {0}")]
    Corrupted(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
