//! # Star Registry
//!
//! A single-node ledger of star claims. Each claim is proven by a Bitcoin
//! message signature over a short-lived ownership message and recorded as a
//! block on an append-only hash chain.
//!
//! ## Overview
//!
//! - **Ownership**: a wallet asks for `<address>:<timestamp>:starRegistry`,
//!   signs it, and submits the signature within the validation window
//! - **Blocks**: every accepted claim becomes a block linked to its predecessor
//! - **Queries**: by hash, by height, and by owner address
//! - **Validation**: recompute every hash and check every link
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use star_registry::core::{Star, SystemClock};
//! use star_registry::StarRegistry;
//!
//! # async fn example(signature: &str) -> star_registry::Result<()> {
//! let registry = StarRegistry::in_memory(Arc::new(SystemClock)).await?;
//!
//! let address = "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC";
//! let message = registry.request_message_ownership_verification(address);
//!
//! // The wallet signs `message` and hands back `signature`.
//! let star = Star::new("68° 52' 56.9", "16h 29m 1.0s", "Testing the story 4");
//! let block = registry.submit_star(address, &message, signature, star).await?;
//!
//! assert!(registry.validate_chain().await?.is_empty());
//! # let _ = block;
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! - `star_registry::core` - Core primitives (Block, BlockHash, Star, etc.)
//! - `star_registry::store` - Storage abstraction and in-memory store

pub mod config;
pub mod error;
pub mod registry;

// Re-export component crates
pub use star_registry_core as core;
pub use star_registry_store as store;

// Re-export main types for convenience
pub use config::{RegistryConfig, DEFAULT_VALIDATION_WINDOW};
pub use error::{RegistryError, Result};
pub use registry::StarRegistry;

// Re-export commonly used core types
pub use star_registry_core::{Block, BlockHash, ChainIssue, Clock, ManualClock, Star, StarClaim, SystemClock};
