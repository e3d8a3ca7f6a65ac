//! In-memory implementation of the ChainStore trait.
//!
//! Blocks live in an append-only `Vec`; index equals height for every chain
//! built through [`ChainStore::append`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use star_registry_core::{Block, BlockHash};

use crate::error::{Result, StoreError};
use crate::traits::{AppendResult, ChainStore};

/// In-memory chain store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    chain: RwLock<Vec<Block>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>> {
        self.chain.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Block>>> {
        self.chain.write().map_err(|_| StoreError::LockPoisoned)
    }
}

#[async_trait]
impl ChainStore for MemoryStore {
    async fn append(&self, block: &Block) -> Result<AppendResult> {
        let mut chain = self.write()?;

        let expected_height = chain.len() as u64;
        let tip = chain.last().map(|b| *b.hash());

        if block.height() != expected_height || block.previous_block_hash() != tip.as_ref() {
            return Ok(AppendResult::Conflict {
                expected_height,
                tip,
            });
        }

        chain.push(block.clone());
        debug!(height = block.height(), hash = %block.hash(), "block appended");
        Ok(AppendResult::Appended)
    }

    async fn get_by_height(&self, height: u64) -> Result<Option<Block>> {
        let chain = self.read()?;
        Ok(usize::try_from(height)
            .ok()
            .and_then(|index| chain.get(index))
            .cloned())
    }

    async fn get_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        let chain = self.read()?;
        Ok(chain.iter().find(|b| b.hash() == hash).cloned())
    }

    async fn tip(&self) -> Result<Option<Block>> {
        let chain = self.read()?;
        Ok(chain.last().cloned())
    }

    async fn len(&self) -> Result<u64> {
        let chain = self.read()?;
        Ok(chain.len() as u64)
    }

    async fn blocks(&self) -> Result<Vec<Block>> {
        let chain = self.read()?;
        Ok(chain.clone())
    }
}

/// Direct access to stored blocks for corruption tests.
#[cfg(any(test, feature = "test-util"))]
impl MemoryStore {
    /// Run `f` on the stored block at `index`. Returns false if out of range.
    pub fn tamper_with(&self, index: usize, f: impl FnOnce(&mut Block)) -> Result<bool> {
        let mut chain = self.write()?;
        Ok(match chain.get_mut(index) {
            Some(block) => {
                f(block);
                true
            }
            None => false,
        })
    }

    /// Remove the stored block at `index`, shifting later blocks down.
    pub fn remove_unchecked(&self, index: usize) -> Result<Option<Block>> {
        let mut chain = self.write()?;
        Ok((index < chain.len()).then(|| chain.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ChainStoreExt;

    fn next_block(previous: &Block, payload: &str) -> Block {
        Block::builder(previous.height() + 1)
            .time(previous.time() + 1)
            .previous(*previous.hash())
            .payload(payload)
            .unwrap()
            .seal()
            .unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await.unwrap());
        assert_eq!(store.tip_height().await.unwrap(), None);

        let genesis = Block::genesis(1000).unwrap();
        assert_eq!(store.append(&genesis).await.unwrap(), AppendResult::Appended);

        let block = next_block(&genesis, "one");
        assert_eq!(store.append(&block).await.unwrap(), AppendResult::Appended);

        assert_eq!(store.len().await.unwrap(), 2);
        assert_eq!(store.tip_height().await.unwrap(), Some(1));
        assert_eq!(store.tip().await.unwrap(), Some(block.clone()));
        assert_eq!(store.get_by_height(0).await.unwrap(), Some(genesis));
        assert_eq!(store.get_by_hash(block.hash()).await.unwrap(), Some(block));
        assert_eq!(store.get_by_height(2).await.unwrap(), None);
        assert_eq!(store.get_by_hash(&BlockHash::ZERO).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_non_tip_blocks() {
        let store = MemoryStore::new();
        let genesis = Block::genesis(1000).unwrap();

        // Wrong height on an empty chain.
        let orphan = next_block(&genesis, "orphan");
        assert_eq!(
            store.append(&orphan).await.unwrap(),
            AppendResult::Conflict {
                expected_height: 0,
                tip: None
            }
        );

        store.append(&genesis).await.unwrap();
        let first = next_block(&genesis, "first");
        let rival = next_block(&genesis, "rival");
        store.append(&first).await.unwrap();

        assert_eq!(
            store.append(&rival).await.unwrap(),
            AppendResult::Conflict {
                expected_height: 2,
                tip: Some(*first.hash())
            }
        );
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_tampering() {
        let store = MemoryStore::new();
        let genesis = Block::genesis(1000).unwrap();
        let one = next_block(&genesis, "one");
        let two = next_block(&one, "two");
        for block in [&genesis, &one, &two] {
            store.append(block).await.unwrap();
        }

        assert!(store.tamper_with(1, |b| b.set_time_unchecked(-1)).unwrap());
        assert!(!store.tamper_with(9, |b| b.set_time_unchecked(-1)).unwrap());
        assert!(!store.get_by_height(1).await.unwrap().unwrap().validate());

        assert_eq!(store.remove_unchecked(1).unwrap().map(|b| b.height()), Some(1));
        assert_eq!(store.remove_unchecked(5).unwrap(), None);
        assert_eq!(store.get_by_height(1).await.unwrap(), Some(two));
    }
}
