//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 hashing
//! - The leading-zero difficulty predicate used by proof of work
//! - ECDSA key management (secp256k1)

pub mod hash;
pub mod keys;

pub use hash::{meets_difficulty, sha256, sha256_hex};
pub use keys::{public_key_from_hex, verify_signature, KeyError, KeyPair};
