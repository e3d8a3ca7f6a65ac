//! ChainStore trait: the abstract interface for block persistence.
//!
//! The registry is generic over this trait. The only implementation shipped
//! is [`crate::MemoryStore`].

use async_trait::async_trait;
use star_registry_core::{Block, BlockHash};

use crate::error::Result;

/// Result of appending a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendResult {
    /// Block was appended at the tip.
    Appended,
    /// The block does not extend the current tip.
    Conflict {
        /// Height the next block must have.
        expected_height: u64,
        /// Hash the next block must link to (`None` for an empty chain).
        tip: Option<BlockHash>,
    },
}

/// Async interface to an append-only sequence of blocks.
///
/// # Design Notes
///
/// - **Append-only**: blocks are never modified or removed once appended.
/// - **Tip check**: `append` accepts a block only when its height equals the
///   current length and its `previousBlockHash` equals the tip's hash.
/// - **Snapshots**: reads return owned clones; concurrent readers never block
///   each other.
#[async_trait]
pub trait ChainStore: Send + Sync {
    /// Append a sealed block at the tip.
    async fn append(&self, block: &Block) -> Result<AppendResult>;

    /// Get the block at `index` (index 0 is genesis).
    async fn get_by_height(&self, height: u64) -> Result<Option<Block>>;

    /// Get the first block whose hash equals `hash`.
    async fn get_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>>;

    /// Get the last block.
    async fn tip(&self) -> Result<Option<Block>>;

    /// Number of blocks.
    async fn len(&self) -> Result<u64>;

    /// All blocks in chain order.
    async fn blocks(&self) -> Result<Vec<Block>>;
}

/// Convenience methods derived from the core operations.
pub trait ChainStoreExt: ChainStore {
    /// True when no block has been appended yet.
    fn is_empty(&self) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Height of the tip, or `None` for an empty chain.
    fn tip_height(&self) -> impl std::future::Future<Output = Result<Option<u64>>> + Send;
}

impl<S: ChainStore + ?Sized> ChainStoreExt for S {
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    async fn tip_height(&self) -> Result<Option<u64>> {
        Ok(self.len().await?.checked_sub(1))
    }
}
