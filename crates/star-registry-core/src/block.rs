//! Block: the sealed unit of the ledger.
//!
//! A block records a height, a creation time, a hex-encoded body and the hash
//! of its predecessor. Its own hash is computed once, when the block is sealed,
//! over every other field. Sealed blocks expose no mutators.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::canonical::{decode_body, encode_body, hash_preimage};
use crate::error::{CoreError, Result};
use crate::star::StarClaim;
use crate::types::BlockHash;

/// Payload stored in the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Body of the genesis block: `{"data":"Genesis Block"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMarker {
    pub data: String,
}

impl Default for GenesisMarker {
    fn default() -> Self {
        Self {
            data: GENESIS_DATA.to_string(),
        }
    }
}

/// A sealed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    hash: BlockHash,
    height: u64,
    body: String,
    time: i64,
    previous_block_hash: Option<BlockHash>,
}

impl Block {
    /// Start building a block at `height`.
    pub fn builder(height: u64) -> BlockBuilder {
        BlockBuilder::new(height)
    }

    /// Build and seal the genesis block.
    pub fn genesis(time: i64) -> Result<Self> {
        BlockBuilder::new(0)
            .time(time)
            .payload(&GenesisMarker::default())?
            .seal()
    }

    pub fn hash(&self) -> &BlockHash {
        &self.hash
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    /// The hex-encoded body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Creation time, Unix seconds.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Hash of the predecessor; `None` for genesis.
    pub fn previous_block_hash(&self) -> Option<&BlockHash> {
        self.previous_block_hash.as_ref()
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Recompute the hash from the current field values.
    pub fn compute_hash(&self) -> Result<BlockHash> {
        compute_hash(
            self.height,
            &self.body,
            self.time,
            self.previous_block_hash.as_ref(),
        )
    }

    /// Check that the stored hash still matches the block's contents.
    ///
    /// Linkage to the predecessor is not checked here; see
    /// [`crate::validation::validate_chain`].
    pub fn validate(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.hash)
    }

    /// Decode the body into any payload type, regardless of height.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T> {
        decode_body(&self.body)
    }

    /// Decode the star claim carried by this block.
    ///
    /// The genesis block has no claim and always fails with
    /// [`CoreError::GenesisBlock`].
    pub fn star_claim(&self) -> Result<StarClaim> {
        if self.is_genesis() {
            return Err(CoreError::GenesisBlock);
        }
        self.decode_body()
    }
}

fn compute_hash(
    height: u64,
    body: &str,
    time: i64,
    previous_block_hash: Option<&BlockHash>,
) -> Result<BlockHash> {
    let preimage = hash_preimage(height, body, time, previous_block_hash)?;
    Ok(BlockHash::digest(&preimage))
}

/// Builder for sealing new blocks.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    height: u64,
    time: i64,
    body: String,
    previous_block_hash: Option<BlockHash>,
}

impl BlockBuilder {
    /// Create a new builder.
    pub fn new(height: u64) -> Self {
        Self {
            height,
            time: 0,
            body: String::new(),
            previous_block_hash: None,
        }
    }

    /// Set the creation time (Unix seconds).
    pub fn time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    /// Set the predecessor hash.
    pub fn previous(mut self, hash: BlockHash) -> Self {
        self.previous_block_hash = Some(hash);
        self
    }

    /// Set an already-encoded body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Encode and set the body.
    pub fn payload<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self> {
        Ok(self.body(encode_body(payload)?))
    }

    /// Compute the hash and produce the sealed block.
    pub fn seal(self) -> Result<Block> {
        let hash = compute_hash(
            self.height,
            &self.body,
            self.time,
            self.previous_block_hash.as_ref(),
        )?;
        Ok(Block {
            hash,
            height: self.height,
            body: self.body,
            time: self.time,
            previous_block_hash: self.previous_block_hash,
        })
    }
}

/// Unchecked mutators for simulating corruption in tests.
#[cfg(any(test, feature = "test-util"))]
impl Block {
    pub fn set_time_unchecked(&mut self, time: i64) {
        self.time = time;
    }

    pub fn set_body_unchecked(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn set_height_unchecked(&mut self, height: u64) {
        self.height = height;
    }

    pub fn set_previous_unchecked(&mut self, previous: Option<BlockHash>) {
        self.previous_block_hash = previous;
    }

    pub fn set_hash_unchecked(&mut self, hash: BlockHash) {
        self.hash = hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::Star;

    const GENESIS_TIME: i64 = 1554145343;

    fn make_claim_block() -> Block {
        let claim = StarClaim::new(
            "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC",
            Star::new("68° 52' 56.9", "16h 29m 1.0s", "Testing the story 4"),
        );
        let genesis = Block::genesis(GENESIS_TIME).unwrap();
        Block::builder(1)
            .time(GENESIS_TIME)
            .previous(*genesis.hash())
            .payload(&claim)
            .unwrap()
            .seal()
            .unwrap()
    }

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis(GENESIS_TIME).unwrap();
        assert_eq!(genesis.height(), 0);
        assert!(genesis.previous_block_hash().is_none());
        assert_eq!(
            genesis.body(),
            "7b2264617461223a2247656e6573697320426c6f636b227d"
        );
        assert_eq!(
            genesis.hash().to_hex(),
            "a7a0cecfd2ba3221a33a6615780b299326eb7a837c63d7110a864cd092f193e3"
        );
        assert!(genesis.validate());
    }

    #[test]
    fn test_genesis_marker_decodes_via_generic_path() {
        let genesis = Block::genesis(GENESIS_TIME).unwrap();
        let marker: GenesisMarker = genesis.decode_body().unwrap();
        assert_eq!(marker, GenesisMarker::default());
    }

    #[test]
    fn test_sealed_block_is_valid() {
        let block = Block::builder(1).time(10).payload("foo").unwrap().seal().unwrap();
        assert!(block.validate());
    }

    #[test]
    fn test_mutated_time_is_invalid() {
        let mut block = Block::builder(1).time(10).payload("foo").unwrap().seal().unwrap();
        block.set_time_unchecked(-1);
        assert!(!block.validate());
    }

    #[test]
    fn test_every_field_is_covered_by_hash() {
        let original = make_claim_block();

        let mut block = original.clone();
        block.set_body_unchecked("22666f6f22");
        assert!(!block.validate());

        let mut block = original.clone();
        block.set_height_unchecked(2);
        assert!(!block.validate());

        let mut block = original.clone();
        block.set_previous_unchecked(None);
        assert!(!block.validate());

        let mut block = original;
        block.set_hash_unchecked(BlockHash::ZERO);
        assert!(!block.validate());
    }

    #[test]
    fn test_star_claim_on_non_genesis() {
        let block = make_claim_block();
        let claim = block.star_claim().unwrap();
        assert_eq!(claim.owner, "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC");
        assert_eq!(claim.star.story(), Some("Testing the story 4"));
    }

    #[test]
    fn test_star_claim_on_genesis_fails() {
        let genesis = Block::genesis(GENESIS_TIME).unwrap();
        assert_eq!(genesis.star_claim(), Err(CoreError::GenesisBlock));

        // Height alone decides, whatever the body holds.
        let mut block = make_claim_block();
        block.set_height_unchecked(0);
        assert_eq!(block.star_claim(), Err(CoreError::GenesisBlock));
    }

    #[test]
    fn test_star_claim_on_corrupt_body() {
        let mut block = make_claim_block();
        block.set_body_unchecked("foo");
        assert!(matches!(block.star_claim(), Err(CoreError::DecodingError(_))));
    }

    #[test]
    fn test_block_hash_golden() {
        let block = make_claim_block();
        assert_eq!(
            block.hash().to_hex(),
            "192cbf2c92482063b0850cd49ca62eb789566006632a6803fed66cb6363fe8ce"
        );
    }

    #[test]
    fn test_serde_field_names() {
        let genesis = Block::genesis(GENESIS_TIME).unwrap();
        let value = serde_json::to_value(&genesis).unwrap();
        assert_eq!(value["height"], 0);
        assert_eq!(value["time"], GENESIS_TIME);
        assert!(value["previousBlockHash"].is_null());
        assert_eq!(value["hash"], genesis.hash().to_hex());

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back, genesis);
    }
}
