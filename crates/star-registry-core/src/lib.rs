//! # Star Registry Core
//!
//! Pure primitives for the Star Registry: blocks, body encoding, ownership
//! messages, Bitcoin message signatures and chain validation.
//!
//! This crate contains no I/O, no storage, no logging. It is pure computation
//! over ledger data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - A sealed ledger entry
//! - [`BlockHash`] - SHA-256 content hash of a block
//! - [`StarClaim`] - The `{owner, star}` payload of every non-genesis block
//! - [`OwnershipMessage`] - The `address:timestamp:starRegistry` message
//! - [`ChainIssue`] - A problem reported by [`validate_chain`]
//!
//! ## Encoding
//!
//! Bodies are canonical JSON stored as lower-case hex. See [`canonical`].

pub mod block;
pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod message;
pub mod star;
pub mod types;
pub mod validation;

pub use block::{Block, BlockBuilder, GenesisMarker, GENESIS_DATA};
pub use canonical::{decode_body, encode_body};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{verify_message, MessageSignature, SignerKind};
pub use error::{CoreError, Result};
pub use message::{OwnershipMessage, MESSAGE_TAG};
pub use star::{Star, StarClaim};
pub use types::BlockHash;
pub use validation::{validate_chain, ChainIssue};
