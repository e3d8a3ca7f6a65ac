//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use star_registry_core::{Block, BlockHash, Star, StarClaim};

use crate::fixtures::TestWallet;

/// Generate a deterministic wallet.
pub fn wallet() -> impl Strategy<Value = TestWallet> {
    any::<[u8; 32]>().prop_map(TestWallet::from_seed)
}

/// Generate a testnet P2PKH address.
pub fn address() -> impl Strategy<Value = String> {
    wallet().prop_map(|w| w.address())
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp in seconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800
}

/// Generate a star field value: text or a whole number.
pub fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "\\PC{0,40}".prop_map(Value::from),
        (-30i64..=30).prop_map(Value::from),
    ]
}

/// Generate a star, with or without the optional and extra fields.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-9]{1,2}° [0-9]{1,2}' [0-9]{1,2}\\.[0-9]",
        "[0-9]{1,2}h [0-9]{1,2}m [0-9]{1,2}\\.[0-9]s",
        "\\PC{0,200}",
        proptest::option::of(field_value()),
        proptest::option::of("[A-Z][a-z]{2,15}"),
        proptest::collection::vec(("x-[a-z]{1,8}", field_value()), 0..3),
    )
        .prop_map(|(dec, ra, story, mag, cen, extra)| {
            let mut star = Star::new(dec, ra, story);
            if let Some(mag) = mag {
                star = star.with_magnitude(mag);
            }
            if let Some(cen) = cen {
                star = star.with_constellation(cen);
            }
            extra
                .into_iter()
                .fold(star, |star, (key, value)| star.with_field(key, value))
        })
}

/// Generate a claim owned by a generated address.
pub fn star_claim() -> impl Strategy<Value = StarClaim> {
    (address(), star()).prop_map(|(owner, star)| StarClaim::new(owner, star))
}

/// Parameters for generating a star block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub height: u64,
    pub time: i64,
    pub previous: BlockHash,
    pub claim: StarClaim,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1u64..=1_000_000u64, timestamp(), block_hash(), star_claim())
            .prop_map(|(height, time, previous, claim)| BlockParams {
                height,
                time,
                previous,
                claim,
            })
            .boxed()
    }
}

/// Build a sealed block from parameters.
pub fn block_from_params(params: &BlockParams) -> star_registry_core::Result<Block> {
    Block::builder(params.height)
        .time(params.time)
        .previous(params.previous)
        .payload(&params.claim)?
        .seal()
}
