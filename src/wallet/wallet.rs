//! Wallet implementation for the ledger
//!
//! A thin wrapper over a secp256k1 key pair. The wallet's address is its
//! compressed public key in hex, which is also the account identifier
//! transactions carry as sender/recipient.

use crate::core::{Ledger, SignedTransaction, TransactionError};
use crate::crypto::{KeyError, KeyPair};

/// A wallet holding the key pair for one ledger account
pub struct Wallet {
    key_pair: KeyPair,
}

impl Wallet {
    /// Create a new wallet with a fresh key pair
    pub fn new() -> Self {
        Self {
            key_pair: KeyPair::generate(),
        }
    }

    /// Import a wallet from a hex-encoded private key
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, KeyError> {
        let key_pair = KeyPair::from_private_key_hex(private_key_hex)?;
        Ok(Self { key_pair })
    }

    /// Get the wallet's address (compressed public key in hex)
    pub fn address(&self) -> String {
        self.key_pair.public_key_hex()
    }

    /// Get the wallet's private key (hex)
    /// WARNING: Keep this secret!
    pub fn private_key(&self) -> String {
        self.key_pair.private_key_hex()
    }

    /// Create and sign a transfer from this wallet
    pub fn send(
        &self,
        recipient: &str,
        amount: u64,
    ) -> Result<SignedTransaction, TransactionError> {
        let mut tx = SignedTransaction::new(&self.address(), recipient, amount);
        tx.sign(&self.key_pair)?;
        Ok(tx)
    }

    /// Get this wallet's net balance on the given ledger
    pub fn balance(&self, ledger: &Ledger) -> i64 {
        ledger.balance_of(&self.address())
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}
