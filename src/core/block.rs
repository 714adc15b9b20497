//! Block implementation for the ledger
//!
//! A block is an ordered batch of transactions hash-linked to its
//! predecessor. The stored hash covers the timestamp, the full
//! transaction list (order-sensitive), the previous block's hash, and the
//! nonce, so any in-place tampering makes the stored hash disagree with a
//! recomputation.

use crate::core::transaction::SignedTransaction;
use crate::crypto::{meets_difficulty, sha256_hex};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// A block in the ledger's chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block creation timestamp
    pub timestamp: DateTime<Utc>,
    /// Transactions included in this block; order is significant
    pub transactions: Vec<SignedTransaction>,
    /// Hash of the previous block, or the genesis marker `"0"`
    pub previous_hash: String,
    /// Hex-encoded SHA-256 of this block's contents
    pub hash: String,
    /// Proof-of-work counter
    pub nonce: u64,
}

impl Block {
    /// Create a new unmined block (nonce 0)
    pub fn new(
        timestamp: DateTime<Utc>,
        transactions: Vec<SignedTransaction>,
        previous_hash: String,
    ) -> Self {
        let mut block = Self {
            timestamp,
            transactions,
            previous_hash,
            hash: String::new(),
            nonce: 0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Canonical byte encoding of the block contents. Variable-length
    /// fields are length-prefixed and the transaction list is encoded in
    /// order, so distinct blocks cannot collide by concatenation
    /// ambiguity.
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.timestamp.timestamp_millis().to_le_bytes());

        buf.extend_from_slice(&(self.transactions.len() as u64).to_le_bytes());
        for tx in &self.transactions {
            let tx_bytes = tx.canonical_bytes();
            buf.extend_from_slice(&(tx_bytes.len() as u64).to_le_bytes());
            buf.extend_from_slice(&tx_bytes);
            // The signature is part of the block contents even though it
            // is excluded from the transaction's own signing hash.
            let signature = tx.signature.as_deref().unwrap_or("");
            buf.extend_from_slice(&(signature.len() as u64).to_le_bytes());
            buf.extend_from_slice(signature.as_bytes());
        }

        buf.extend_from_slice(&(self.previous_hash.len() as u64).to_le_bytes());
        buf.extend_from_slice(self.previous_hash.as_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    /// Recompute this block's hash from its current contents
    pub fn compute_hash(&self) -> String {
        sha256_hex(&self.canonical_bytes())
    }

    /// Mine the block: search for a nonce whose hash starts with
    /// `difficulty` zero hex digits. Returns the number of attempts.
    ///
    /// This is a blocking CPU-bound search; expected work grows as
    /// 16^difficulty. Difficulty 0 accepts the initial hash.
    pub fn mine(&mut self, difficulty: usize) -> u64 {
        let mut attempts = 0u64;
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce += 1;
            self.hash = self.compute_hash();
            attempts += 1;
        }

        info!("Block mined: {}", self.hash);
        attempts
    }

    /// Check whether the stored hash meets the difficulty target
    pub fn is_mined(&self, difficulty: usize) -> bool {
        meets_difficulty(&self.hash, difficulty)
    }

    /// Check every contained transaction, short-circuiting on the first
    /// invalid one. An unsigned transaction inside a block is an invalid
    /// transaction, not a crash.
    pub fn has_valid_transactions(&self) -> bool {
        for (index, tx) in self.transactions.iter().enumerate() {
            match tx.is_valid() {
                Ok(true) => {}
                Ok(false) => {
                    warn!("Transaction {} in block {} is invalid", index, self.hash);
                    return false;
                }
                Err(e) => {
                    warn!(
                        "Transaction {} in block {} failed validation: {}",
                        index, self.hash, e
                    );
                    return false;
                }
            }
        }
        true
    }
}
