//! The registry: ownership-verified star claims on an append-only chain.
//!
//! The registry owns the chain's lifecycle. Opening it seeds the genesis
//! block; after that the chain only grows through [`StarRegistry::submit_star`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use star_registry_core::{
    encode_body, validate_chain, verify_message, Block, BlockHash, ChainIssue, Clock,
    OwnershipMessage, Star, StarClaim,
};
use star_registry_store::{AppendResult, ChainStore, ChainStoreExt, MemoryStore, StoreError};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// The star registry.
///
/// Provides a unified API for:
/// - Issuing ownership verification messages
/// - Submitting signed star claims
/// - Looking up blocks and stars
/// - Validating the whole chain
///
/// Reads run concurrently; appends are serialized by an internal lock so that
/// height and predecessor are always computed against the current tip.
pub struct StarRegistry<S: ChainStore = MemoryStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Source of wall-clock time.
    clock: Arc<dyn Clock>,
    /// Configuration.
    config: RegistryConfig,
    /// Held across "read tip, seal, append".
    append_lock: Mutex<()>,
}

impl StarRegistry<MemoryStore> {
    /// Open a registry over a fresh in-memory store with default config.
    pub async fn in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open(MemoryStore::new(), clock, RegistryConfig::default()).await
    }
}

impl<S: ChainStore> StarRegistry<S> {
    /// Open a registry, creating the genesis block if the store is empty.
    pub async fn open(store: S, clock: Arc<dyn Clock>, config: RegistryConfig) -> Result<Self> {
        let registry = Self {
            store: Arc::new(store),
            clock,
            config,
            append_lock: Mutex::new(()),
        };
        registry.initialize_chain().await?;
        Ok(registry)
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    async fn initialize_chain(&self) -> Result<()> {
        let _guard = self.append_lock.lock().await;

        if !self.store.is_empty().await? {
            debug!("store already holds a chain, skipping genesis");
            return Ok(());
        }

        let genesis = Block::genesis(self.clock.now_secs())?;
        self.append_sealed(&genesis).await?;
        info!(hash = %genesis.hash(), "genesis block created");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Protocol
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the message `address` must sign: `<address>:<now>:starRegistry`.
    ///
    /// The address is not validated here.
    pub fn request_message_ownership_verification(&self, address: &str) -> String {
        OwnershipMessage::new(address, self.clock.now_secs()).to_string()
    }

    /// Submit a signed star claim and append it to the chain.
    ///
    /// Rejected with [`RegistryError::TimeWindowExceeded`] when the message
    /// is older than the validation window, and with
    /// [`RegistryError::InvalidSignature`] when `signature` does not prove
    /// control of `address`.
    ///
    /// Only `elapsed > window` is rejected. A message whose timestamp lies in
    /// the future (for example one written in milliseconds) never expires, so
    /// its signature can be replayed for as long as that timestamp stays ahead
    /// of the clock.
    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block> {
        let now = self.clock.now_secs();
        let issued_at = OwnershipMessage::parse(message)?.timestamp();

        let elapsed = now.saturating_sub(issued_at);
        let window = self.config.validation_window.as_secs();
        if elapsed > i64::try_from(window).unwrap_or(i64::MAX) {
            warn!(address, elapsed, window, "star submission outside time window");
            return Err(RegistryError::TimeWindowExceeded { elapsed, window });
        }

        if let Err(e) = verify_message(address, message, signature) {
            warn!(address, error = %e, "star submission with invalid signature");
            return Err(e.into());
        }

        let body = encode_body(&StarClaim::new(address, star))?;

        let _guard = self.append_lock.lock().await;
        let tip = self.tip().await?;
        let block = Block::builder(tip.height() + 1)
            .time(now)
            .previous(*tip.hash())
            .body(body)
            .seal()?;
        self.append_sealed(&block).await?;

        info!(height = block.height(), hash = %block.hash(), owner = address, "star registered");
        Ok(block)
    }

    /// Append a sealed block. Callers hold `append_lock`.
    async fn append_sealed(&self, block: &Block) -> Result<()> {
        match self.store.append(block).await? {
            AppendResult::Appended => Ok(()),
            AppendResult::Conflict { expected_height, .. } => {
                warn!(
                    height = block.height(),
                    expected_height, "block does not extend the tip"
                );
                Err(RegistryError::Conflict {
                    height: block.height(),
                })
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Height of the tip (`chain length - 1`).
    pub async fn chain_height(&self) -> Result<u64> {
        Ok(self
            .store
            .tip_height()
            .await?
            .ok_or_else(|| StoreError::Corrupted("chain has no genesis block".into()))?)
    }

    /// The genesis block.
    pub async fn genesis(&self) -> Result<Block> {
        Ok(self
            .store
            .get_by_height(0)
            .await?
            .ok_or_else(|| StoreError::Corrupted("chain has no genesis block".into()))?)
    }

    async fn tip(&self) -> Result<Block> {
        Ok(self
            .store
            .tip()
            .await?
            .ok_or_else(|| StoreError::Corrupted("chain has no genesis block".into()))?)
    }

    /// Find a block by its hex hash. A string that is not a hash is a miss.
    pub async fn get_block_by_hash(&self, hash: &str) -> Result<Option<Block>> {
        let Ok(hash) = hash.parse::<BlockHash>() else {
            debug!(hash, "lookup with unparsable hash");
            return Ok(None);
        };
        Ok(self.store.get_by_hash(&hash).await?)
    }

    /// Get the block at `height`, or `None` when out of range.
    pub async fn get_block_by_height(&self, height: u64) -> Result<Option<Block>> {
        Ok(self.store.get_by_height(height).await?)
    }

    /// Decode the star claim stored at `height`, or `None` when out of range.
    ///
    /// Fails with [`RegistryError::GenesisBlock`] for height 0.
    pub async fn get_block_data(&self, height: u64) -> Result<Option<StarClaim>> {
        match self.store.get_by_height(height).await? {
            Some(block) => Ok(Some(block.star_claim()?)),
            None => Ok(None),
        }
    }

    /// All star claims owned by `address`, in chain order.
    ///
    /// Blocks whose body cannot be decoded are skipped with a warning.
    pub async fn get_stars_by_wallet_address(&self, address: &str) -> Result<Vec<StarClaim>> {
        let blocks = self.store.blocks().await?;

        let stars = blocks
            .iter()
            .filter(|block| !block.is_genesis())
            .filter_map(|block| match block.star_claim() {
                Ok(claim) => Some(claim),
                Err(e) => {
                    warn!(hash = %block.hash(), error = %e, "skipping undecodable block");
                    None
                }
            })
            .filter(|claim| claim.owner == address)
            .collect();

        Ok(stars)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate every block and every link, returning typed issues.
    pub async fn chain_issues(&self) -> Result<Vec<ChainIssue>> {
        let blocks = self.store.blocks().await?;
        let issues = validate_chain(&blocks);
        if issues.is_empty() {
            debug!(blocks = blocks.len(), "chain is valid");
        } else {
            warn!(blocks = blocks.len(), issues = issues.len(), "chain validation failed");
        }
        Ok(issues)
    }

    /// Validate the chain, one human-readable message per problem.
    ///
    /// An empty list means the chain is valid.
    pub async fn validate_chain(&self) -> Result<Vec<String>> {
        let issues = self.chain_issues().await?;
        Ok(issues.iter().map(ToString::to_string).collect())
    }
}
