//! Golden test vectors for deterministic verification.
//!
//! The block vectors pin the hash preimage and body encoding. The signed
//! message vectors were produced by real Bitcoin wallets and pin the
//! signed-message digest and public key recovery.

use star_registry_core::{verify_message, Block, Star, StarClaim};

/// Timestamp of the golden genesis block.
pub const GENESIS_TIME: i64 = 1554145343;

/// Hex body of the genesis block: `{"data":"Genesis Block"}`.
pub const GENESIS_BODY: &str = "7b2264617461223a2247656e6573697320426c6f636b227d";

/// Hash of the genesis block sealed at [`GENESIS_TIME`].
pub const GENESIS_HASH: &str = "a7a0cecfd2ba3221a33a6615780b299326eb7a837c63d7110a864cd092f193e3";

/// Owner of the first golden star block.
pub const FIRST_STAR_OWNER: &str = "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC";

/// Hex body of the first golden star block.
pub const FIRST_STAR_BODY: &str = "7b226f776e6572223a226e31575371506b444258576e563355477369456b7879754a76786152587266664c43222c2273746172223a7b22646563223a223638c2b0203532272035362e39222c227261223a223136682032396d20312e3073222c2273746f7279223a2254657374696e67207468652073746f72792034227d7d";

/// Hash of the first golden star block (height 1, sealed at [`GENESIS_TIME`]).
pub const FIRST_STAR_HASH: &str = "192cbf2c92482063b0850cd49ca62eb789566006632a6803fed66cb6363fe8ce";

/// The star carried by the first golden star block.
pub fn first_star() -> Star {
    Star::new("68° 52' 56.9", "16h 29m 1.0s", "Testing the story 4")
}

/// The claim carried by the first golden star block.
pub fn first_star_claim() -> StarClaim {
    StarClaim::new(FIRST_STAR_OWNER, first_star())
}

/// A wallet-produced signature over an ownership message.
#[derive(Debug, Clone)]
pub struct SignedMessageVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Base58check address of the signer.
    pub address: &'static str,
    /// The signed ownership message.
    pub message: &'static str,
    /// Base64 compact signature.
    pub signature: &'static str,
    /// Seconds timestamp embedded in the message.
    pub issued_at: i64,
}

/// Get all signed message vectors.
pub fn signed_messages() -> Vec<SignedMessageVector> {
    vec![
        SignedMessageVector {
            name: "testnet P2PKH, compressed key",
            address: FIRST_STAR_OWNER,
            message: "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC:1554145343:starRegistry",
            signature: "IDw6dVmBEjmXgH7b8FvVlQgPGRLHw6JC2t63BNoQdZNMG4XxjUBN2C+rdROmsdo8L1JPI4yauRxvT/gI/JhEs1E=",
            issued_at: GENESIS_TIME,
        },
        SignedMessageVector {
            name: "testnet P2PKH, millisecond timestamp",
            address: "moHNUnnRBCVWVPWdwiyuFifEckbm7GP8cJ",
            message: "moHNUnnRBCVWVPWdwiyuFifEckbm7GP8cJ:1554145943000:starRegistry",
            signature: "H9Vw7/VbgpZSGgoHciYvm2GzBzM0fz2r4uszyNJIdhedaZ+qzoTuJBYOeVsCwzz4v1iPOHGpAV+r1fTpvDSgvB0=",
            issued_at: 1554145943000,
        },
    ]
}

/// The first golden star block, built from its inputs.
pub fn first_star_block() -> star_registry_core::Result<Block> {
    let genesis = Block::genesis(GENESIS_TIME)?;
    Block::builder(1)
        .time(GENESIS_TIME)
        .previous(*genesis.hash())
        .payload(&first_star_claim())?
        .seal()
}

/// Verify all signed message vectors.
///
/// Returns (name, passed) for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    signed_messages()
        .iter()
        .map(|v| {
            let passed = verify_message(v.address, v.message, v.signature).is_ok();
            (v.name.to_string(), passed)
        })
        .collect()
}
