//! Core ledger components
//!
//! This module contains the three cooperating entities that make the
//! ledger self-verifying:
//! - Transactions (account model, ECDSA-signed)
//! - Blocks (hash-linked, proof of work)
//! - Ledger (chain management, pending pool, balances, validation)

pub mod block;
pub mod ledger;
pub mod transaction;

pub use block::Block;
pub use ledger::{
    Ledger, LedgerError, DEFAULT_DIFFICULTY, GENESIS_PREVIOUS_HASH, MINING_REWARD,
};
pub use transaction::{SignedTransaction, TransactionError};
