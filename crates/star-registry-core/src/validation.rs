//! Chain validation: per-block hash checks and predecessor linkage.

use std::fmt;

use crate::block::Block;
use crate::types::BlockHash;

/// A problem found while walking the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainIssue {
    /// The block's stored hash no longer matches its contents.
    InvalidBlock(BlockHash),
    /// The block's `previousBlockHash` does not match the block before it.
    BrokenLink(BlockHash),
}

impl ChainIssue {
    /// Hash of the block the issue was reported for.
    pub fn block_hash(&self) -> &BlockHash {
        match self {
            Self::InvalidBlock(hash) | Self::BrokenLink(hash) => hash,
        }
    }
}

impl fmt::Display for ChainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlock(hash) => write!(f, "Block {hash} is invalid"),
            Self::BrokenLink(hash) => write!(f, "Block {hash} is broken from the chain"),
        }
    }
}

/// Walk `blocks` in order and report every issue found.
///
/// Each block gets two independent checks: its own hash, and (from index 1
/// on) its link to the block at the previous index. An empty result means the
/// chain is valid.
pub fn validate_chain(blocks: &[Block]) -> Vec<ChainIssue> {
    let mut issues = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        if !block.validate() {
            issues.push(ChainIssue::InvalidBlock(*block.hash()));
        }

        if index > 0 {
            let previous = blocks[index - 1].hash();
            if block.previous_block_hash() != Some(previous) {
                issues.push(ChainIssue::BrokenLink(*block.hash()));
            }
        }
    }

    issues
}
