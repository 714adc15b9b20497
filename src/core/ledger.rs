//! Ledger implementation
//!
//! The ledger owns an append-only chain of blocks plus the pool of
//! pending transactions awaiting inclusion in the next block. It is a
//! single-threaded, synchronous structure: the ledger exclusively owns
//! its blocks and blocks own their transactions, so there is no shared
//! mutable state to guard. Callers that need concurrent admission or
//! background mining must wrap the ledger in their own lock.

use crate::core::block::Block;
use crate::core::transaction::{SignedTransaction, TransactionError};
use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default mining difficulty (number of leading zero hex digits)
pub const DEFAULT_DIFFICULTY: usize = 2;

/// Coins issued to the miner per mined block
pub const MINING_REWARD: u64 = 100;

/// Previous-hash marker carried by the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Errors raised when a transaction is rejected at admission
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Transaction is missing a sender or recipient address")]
    MissingAddress,
    #[error("Invalid transaction cannot be added to the pending pool")]
    InvalidTransaction,
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

/// An append-only chain of mined blocks plus a pending-transaction pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// The chain of blocks; index 0 is the genesis block
    pub chain: Vec<Block>,
    /// Mining difficulty in leading zero hex digits
    pub difficulty: usize,
    /// Admitted transactions awaiting inclusion in the next block
    pub pending_transactions: Vec<SignedTransaction>,
    /// Reward issued to the miner per block
    pub mining_reward: u64,
}

impl Ledger {
    /// Create a new ledger containing only the genesis block
    pub fn new() -> Self {
        Self::with_difficulty(DEFAULT_DIFFICULTY)
    }

    /// Create a ledger with a custom mining difficulty
    pub fn with_difficulty(difficulty: usize) -> Self {
        Self {
            chain: vec![Self::create_genesis_block()],
            difficulty,
            pending_transactions: Vec::new(),
            mining_reward: MINING_REWARD,
        }
    }

    /// The fixed first block: no transactions, previous hash `"0"`
    fn create_genesis_block() -> Block {
        Block::new(Utc::now(), Vec::new(), GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Get the most recently appended block
    pub fn latest_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always contains the genesis block")
    }

    /// Ledger height: number of blocks after genesis
    pub fn height(&self) -> usize {
        self.chain.len() - 1
    }

    /// Admit a transaction into the pending pool.
    ///
    /// Rejects transactions missing a sender or recipient
    /// ([`LedgerError::MissingAddress`]) and transactions whose signature
    /// does not verify ([`LedgerError::InvalidTransaction`]). An unsigned
    /// transaction surfaces as [`TransactionError::Unsigned`] via the
    /// `Transaction` variant. A rejected call leaves the pool untouched.
    ///
    /// No balance-sufficiency check is performed here: this ledger is a
    /// demonstration and admits overdrafts.
    pub fn add_transaction(&mut self, tx: SignedTransaction) -> Result<(), LedgerError> {
        let sender_missing = tx.sender.as_deref().map_or(true, str::is_empty);
        if sender_missing || tx.recipient.is_empty() {
            return Err(LedgerError::MissingAddress);
        }

        if !tx.is_valid()? {
            return Err(LedgerError::InvalidTransaction);
        }

        self.pending_transactions.push(tx);
        Ok(())
    }

    /// Drain the pending pool into a new block, mine it, and append it.
    ///
    /// A reward transaction (system → `reward_address`) is added to the
    /// pool before it is drained, so the miner is paid in the block it
    /// mines. This is the only writer of the chain after genesis.
    pub fn mine_pending_transactions(&mut self, reward_address: &str) -> &Block {
        let reward = SignedTransaction::reward(reward_address, self.mining_reward);
        self.pending_transactions.push(reward);

        // Freeze the pool into the new block; the pool is left empty.
        let transactions = std::mem::take(&mut self.pending_transactions);
        let mut block = Block::new(
            Utc::now(),
            transactions,
            self.latest_block().hash.clone(),
        );

        info!(
            "Mining block {} with difficulty {}...",
            self.chain.len(),
            self.difficulty
        );
        block.mine(self.difficulty);

        self.chain.push(block);
        self.latest_block()
    }

    /// Net balance of an address over the whole chain.
    ///
    /// Every block and every transaction is scanned; there is no cached
    /// index. Balances can go negative because admission never checks
    /// them.
    pub fn balance_of(&self, address: &str) -> i64 {
        let mut balance = 0i64;

        for block in &self.chain {
            for tx in &block.transactions {
                if tx.sender.as_deref() == Some(address) {
                    balance -= tx.amount as i64;
                }
                if tx.recipient == address {
                    balance += tx.amount as i64;
                }
            }
        }

        balance
    }

    /// Validate the whole chain.
    ///
    /// Every block after genesis must contain only valid transactions,
    /// carry a hash that matches a recomputation of its contents, and
    /// link to the hash of its predecessor. All blocks are checked;
    /// validation stops at the first violation and reports the offending
    /// block index.
    pub fn is_chain_valid(&self) -> bool {
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let previous = &self.chain[i - 1];

            if !current.has_valid_transactions() {
                warn!("Block {} contains an invalid transaction", i);
                return false;
            }

            if current.hash != current.compute_hash() {
                warn!("Block {} hash does not match its contents", i);
                return false;
            }

            if current.previous_hash != previous.hash {
                warn!("Block {} is not linked to block {}", i, i - 1);
                return false;
            }
        }

        true
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    /// Difficulty 1 keeps test mining around 16 attempts on average
    const TEST_DIFFICULTY: usize = 1;

    fn signed_tx(kp: &KeyPair, recipient: &str, amount: u64) -> SignedTransaction {
        let mut tx = SignedTransaction::new(&kp.public_key_hex(), recipient, amount);
        tx.sign(kp).unwrap();
        tx
    }

    #[test]
    fn test_genesis_only_chain_is_valid() {
        let ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        assert_eq!(ledger.chain.len(), 1);
        assert_eq!(ledger.height(), 0);
        assert_eq!(ledger.chain[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(ledger.chain[0].transactions.is_empty());
        assert!(ledger.is_chain_valid());
    }

    #[test]
    fn test_add_transaction_rejects_missing_recipient() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        let kp = KeyPair::generate();
        let tx = SignedTransaction::new(&kp.public_key_hex(), "", 10);

        assert!(matches!(
            ledger.add_transaction(tx),
            Err(LedgerError::MissingAddress)
        ));
        assert!(ledger.pending_transactions.is_empty());
    }

    #[test]
    fn test_add_transaction_rejects_missing_sender() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        // Reward transactions are issued by mining, never admitted
        let tx = SignedTransaction::reward("recipient", 100);

        assert!(matches!(
            ledger.add_transaction(tx),
            Err(LedgerError::MissingAddress)
        ));
    }

    #[test]
    fn test_add_transaction_propagates_unsigned_error() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        let kp = KeyPair::generate();
        let tx = SignedTransaction::new(&kp.public_key_hex(), "recipient", 10);

        assert!(matches!(
            ledger.add_transaction(tx),
            Err(LedgerError::Transaction(TransactionError::Unsigned))
        ));
        assert!(ledger.pending_transactions.is_empty());
    }

    #[test]
    fn test_add_transaction_rejects_tampered_signature() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        let kp = KeyPair::generate();
        let mut tx = signed_tx(&kp, "recipient", 10);
        tx.amount = 9999;

        assert!(matches!(
            ledger.add_transaction(tx),
            Err(LedgerError::InvalidTransaction)
        ));
        assert!(ledger.pending_transactions.is_empty());
    }

    #[test]
    fn test_mining_pays_reward_and_clears_pool() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        let kp = KeyPair::generate();
        let miner = kp.public_key_hex();

        ledger
            .add_transaction(signed_tx(&kp, "recipient", 10))
            .unwrap();
        ledger.mine_pending_transactions(&miner);

        assert!(ledger.pending_transactions.is_empty());
        assert_eq!(ledger.height(), 1);
        // Transfer and reward both land in the mined block
        assert_eq!(ledger.latest_block().transactions.len(), 2);
        assert_eq!(ledger.balance_of(&miner), 100 - 10);
        assert_eq!(ledger.balance_of("recipient"), 10);
    }

    #[test]
    fn test_mined_blocks_are_linked() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        ledger.mine_pending_transactions("miner");
        ledger.mine_pending_transactions("miner");

        assert_eq!(ledger.chain[1].previous_hash, ledger.chain[0].hash);
        assert_eq!(ledger.chain[2].previous_hash, ledger.chain[1].hash);
        assert!(ledger.is_chain_valid());
    }

    #[test]
    fn test_balance_is_additive_across_blocks() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let alice_addr = alice.public_key_hex();
        let bob_addr = bob.public_key_hex();

        ledger.mine_pending_transactions(&alice_addr); // alice +100

        ledger
            .add_transaction(signed_tx(&alice, &bob_addr, 30))
            .unwrap();
        ledger.mine_pending_transactions(&alice_addr); // alice -30 +100

        ledger
            .add_transaction(signed_tx(&bob, &alice_addr, 5))
            .unwrap();
        ledger.mine_pending_transactions(&bob_addr); // bob -5 +100

        assert_eq!(ledger.balance_of(&alice_addr), 100 - 30 + 100 + 5);
        assert_eq!(ledger.balance_of(&bob_addr), 30 - 5 + 100);
        assert_eq!(ledger.balance_of("stranger"), 0);
    }

    #[test]
    fn test_tampering_detected_at_any_chain_position() {
        for tampered_index in [1, 2, 3] {
            let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
            ledger.mine_pending_transactions("miner");
            ledger.mine_pending_transactions("miner");
            ledger.mine_pending_transactions("miner");
            assert!(ledger.is_chain_valid());

            ledger.chain[tampered_index].transactions[0].amount = 1;
            assert!(
                !ledger.is_chain_valid(),
                "tampering with block {} went undetected",
                tampered_index
            );
        }
    }

    #[test]
    fn test_broken_link_detected() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        ledger.mine_pending_transactions("miner");
        ledger.mine_pending_transactions("miner");

        // Re-mine block 1 in isolation so its own hash is consistent but
        // block 2 no longer points at it.
        ledger.chain[1].nonce = 0;
        ledger.chain[1].transactions[0].amount = 1;
        ledger.chain[1].hash = ledger.chain[1].compute_hash();
        ledger.chain[1].mine(TEST_DIFFICULTY);

        assert!(!ledger.is_chain_valid());
    }

    #[test]
    fn test_end_to_end_demo_scenario() {
        let mut ledger = Ledger::with_difficulty(TEST_DIFFICULTY);
        assert!(ledger.is_chain_valid());

        let alice = KeyPair::generate();
        let alice_addr = alice.public_key_hex();
        let bob_addr = KeyPair::generate().public_key_hex();

        ledger
            .add_transaction(signed_tx(&alice, &bob_addr, 10))
            .unwrap();
        ledger.mine_pending_transactions(&alice_addr);

        assert_eq!(ledger.balance_of(&alice_addr), 90);
        assert_eq!(ledger.balance_of(&bob_addr), 10);
        assert!(ledger.is_chain_valid());

        // Tamper with the recorded transfer without re-signing or
        // re-mining; the chain must flag it.
        ledger.chain[1].transactions[0].amount = 1;
        assert!(!ledger.is_chain_valid());
    }
}
