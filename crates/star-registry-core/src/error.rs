//! Error types for the Star Registry Core.

use thiserror::Error;

/// Core errors that can occur while building, decoding or verifying ledger data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The genesis block carries a marker payload, not a star claim.
    #[error("the block is a genesis block")]
    GenesisBlock,

    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    #[error("malformed verification message: {0}")]
    MalformedMessage(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
