//! Mini-Ledger: a single-process proof-of-work ledger simulator
//!
//! This crate demonstrates the core primitives of a proof-of-work
//! blockchain in one process:
//! - ECDSA-signed transactions (secp256k1)
//! - Hash-linked blocks mined against a leading-zero difficulty target
//! - Whole-chain validation and full-scan balance computation
//!
//! There is no networking, no consensus between nodes, and no
//! persistence; the ledger lives and dies with the process.
//!
//! # Example
//!
//! ```rust
//! use mini_ledger::core::Ledger;
//! use mini_ledger::wallet::Wallet;
//!
//! let mut ledger = Ledger::with_difficulty(1);
//! let alice = Wallet::new();
//! let bob = Wallet::new();
//!
//! // Alice signs a transfer and submits it to the pending pool
//! let tx = alice.send(&bob.address(), 10).unwrap();
//! ledger.add_transaction(tx).unwrap();
//!
//! // Mining drains the pool into a new block and pays Alice the reward
//! ledger.mine_pending_transactions(&alice.address());
//!
//! assert_eq!(alice.balance(&ledger), 90);
//! assert_eq!(bob.balance(&ledger), 10);
//! assert!(ledger.is_chain_valid());
//! ```

pub mod core;
pub mod crypto;
pub mod wallet;

// Re-export commonly used types
pub use crate::core::{
    Block, Ledger, LedgerError, SignedTransaction, TransactionError, DEFAULT_DIFFICULTY,
    MINING_REWARD,
};
pub use crate::crypto::{KeyError, KeyPair};
pub use crate::wallet::Wallet;
