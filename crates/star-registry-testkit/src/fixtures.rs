//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: wallets that sign ownership
//! messages the way Bitcoin wallets do, and a registry on a manual clock.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use star_registry::{RegistryConfig, StarRegistry};
use star_registry_core::crypto::{hash160, message_digest, sha256};
use star_registry_core::{Block, ManualClock, SignerKind, Star};
use star_registry_store::MemoryStore;

use crate::vectors::GENESIS_TIME;

/// Version byte of testnet P2PKH addresses.
const TESTNET_P2PKH: u8 = 0x6f;
/// Version byte of testnet P2SH addresses.
const TESTNET_P2SH: u8 = 0xc4;

/// A secp256k1 key that signs Bitcoin messages.
#[derive(Debug, Clone)]
pub struct TestWallet {
    key: SigningKey,
}

impl TestWallet {
    /// Create with a random key.
    pub fn generate() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a deterministic wallet from seed.
    ///
    /// Seeds that are not valid scalars are rehashed until one is.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let mut bytes = seed;
        loop {
            if let Ok(key) = SigningKey::from_slice(&bytes) {
                return Self { key };
            }
            bytes = sha256(&bytes);
        }
    }

    /// Testnet P2PKH address over the compressed public key.
    pub fn address(&self) -> String {
        self.address_for(SignerKind::P2pkhCompressed)
            .unwrap_or_default()
    }

    /// Testnet address of `kind`, or `None` for bech32.
    pub fn address_for(&self, kind: SignerKind) -> Option<String> {
        let key = self.key.verifying_key();
        let (version, hash) = match kind {
            SignerKind::P2pkhUncompressed => {
                (TESTNET_P2PKH, hash160(key.to_encoded_point(false).as_bytes()))
            }
            SignerKind::P2pkhCompressed => {
                (TESTNET_P2PKH, hash160(key.to_encoded_point(true).as_bytes()))
            }
            SignerKind::P2shP2wpkh => {
                let mut redeem_script = vec![0x00, 0x14];
                redeem_script.extend_from_slice(&hash160(key.to_encoded_point(true).as_bytes()));
                (TESTNET_P2SH, hash160(&redeem_script))
            }
            SignerKind::P2wpkh => return None,
        };

        let mut payload = Vec::with_capacity(21);
        payload.push(version);
        payload.extend_from_slice(&hash);
        Some(bs58::encode(payload).with_check().into_string())
    }

    /// Sign `message` for the compressed P2PKH address.
    pub fn sign_message(&self, message: &str) -> anyhow::Result<String> {
        self.sign_message_as(SignerKind::P2pkhCompressed, message)
    }

    /// Sign `message`, encoding the header byte for `kind`.
    pub fn sign_message_as(&self, kind: SignerKind, message: &str) -> anyhow::Result<String> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&message_digest(message))?;

        let mut bytes = Vec::with_capacity(65);
        bytes.push(kind.header_base() + recovery_id.to_byte());
        bytes.extend_from_slice(&signature.to_bytes());
        Ok(STANDARD.encode(bytes))
    }
}

/// A registry on an in-memory store, driven by a manual clock.
pub struct RegistryFixture {
    pub clock: Arc<ManualClock>,
    pub registry: StarRegistry,
}

impl RegistryFixture {
    /// Registry whose genesis block is sealed at [`GENESIS_TIME`].
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_config(GENESIS_TIME, RegistryConfig::default()).await
    }

    /// Registry whose genesis block is sealed at `time`.
    pub async fn with_config(time: i64, config: RegistryConfig) -> anyhow::Result<Self> {
        let clock = Arc::new(ManualClock::new(time));
        let registry = StarRegistry::open(MemoryStore::new(), clock.clone(), config).await?;
        Ok(Self { clock, registry })
    }

    /// The in-memory store, for tampering.
    pub fn store(&self) -> &MemoryStore {
        self.registry.store()
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }

    /// Request a message for `wallet`, sign it and submit `star`.
    pub async fn claim(&self, wallet: &TestWallet, star: Star) -> anyhow::Result<Block> {
        let address = wallet.address();
        let message = self.registry.request_message_ownership_verification(&address);
        let signature = wallet.sign_message(&message)?;
        Ok(self
            .registry
            .submit_star(&address, &message, &signature, star)
            .await?)
    }
}

/// Create multiple deterministic wallets for multi-owner tests.
pub fn multi_wallet_fixtures(count: usize) -> Vec<TestWallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8 + 1;
            TestWallet::from_seed(seed)
        })
        .collect()
}

/// A star with a numbered story.
pub fn sample_star(n: usize) -> Star {
    Star::new("68° 52' 56.9", "16h 29m 1.0s", format!("Testing the story {n}"))
}
