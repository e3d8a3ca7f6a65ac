//! # Star Registry Testkit
//!
//! Testing utilities for the Star Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known blocks and wallet signatures with expected outputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Signing wallets and a registry on a manual clock
//!
//! ## Golden Vectors
//!
//! ```rust
//! use star_registry_testkit::vectors::{first_star_block, FIRST_STAR_HASH};
//!
//! let block = first_star_block().unwrap();
//! assert_eq!(block.hash().to_hex(), FIRST_STAR_HASH);
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use star_registry_testkit::fixtures::TestWallet;
//! use star_registry_core::verify_message;
//!
//! let wallet = TestWallet::from_seed([1; 32]);
//! let signature = wallet.sign_message("hello").unwrap();
//! assert!(verify_message(&wallet.address(), "hello", &signature).is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_wallet_fixtures, sample_star, RegistryFixture, TestWallet};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{signed_messages, verify_all_vectors, SignedMessageVector};
