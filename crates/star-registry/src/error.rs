//! Error types for the registry.

use star_registry_core::CoreError;
use star_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The genesis block's body was asked for as a star claim.
    #[error("the block is a genesis block")]
    GenesisBlock,

    /// The signed message is older than the validation window.
    #[error("time window exceeded: {elapsed}s elapsed, limit is {window}s")]
    TimeWindowExceeded { elapsed: i64, window: u64 },

    /// The signature was not produced by the key behind the address.
    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    /// The message is not `<address>:<timestamp>:starRegistry`.
    #[error("malformed verification message: {0}")]
    MalformedMessage(String),

    /// Another block was appended at the height this one was built for.
    #[error("conflict at height {height}: block does not extend the tip")]
    Conflict { height: u64 },

    /// Encoding or decoding of block data failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<CoreError> for RegistryError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::GenesisBlock => RegistryError::GenesisBlock,
            CoreError::InvalidSignature(reason) => RegistryError::InvalidSignature(reason),
            CoreError::MalformedMessage(msg) => RegistryError::MalformedMessage(msg),
            CoreError::EncodingError(msg) | CoreError::DecodingError(msg) => {
                RegistryError::Encoding(msg)
            }
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
