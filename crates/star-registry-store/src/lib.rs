//! # Star Registry Store
//!
//! Storage abstraction for the Star Registry. Provides a trait-based interface
//! over the ordered block sequence and an in-memory implementation.
//!
//! ## Key Types
//!
//! - [`ChainStore`] - The async trait for all storage operations
//! - [`MemoryStore`] - In-memory, append-only storage
//! - [`AppendResult`] - Result of appending a block
//!
//! ## Usage
//!
//! ```rust
//! use star_registry_core::Block;
//! use star_registry_store::{AppendResult, ChainStore, MemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let genesis = Block::genesis(1554145343)?;
//! assert_eq!(store.append(&genesis).await?, AppendResult::Appended);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Notes
//!
//! - **Tip check**: a block that does not extend the tip returns `Conflict`
//! - **Tampering**: the `test-util` feature adds `MemoryStore::tamper_with` and
//!   `MemoryStore::remove_unchecked` for corruption tests

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::{AppendResult, ChainStore, ChainStoreExt};
