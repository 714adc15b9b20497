//! Signed value transfers between accounts
//!
//! The ledger uses an account model: a transaction moves `amount` coins
//! from `sender` to `recipient`, where both are compressed secp256k1
//! public keys in hex. A transaction with no sender is a reward
//! transaction issued by the system when a block is mined; it carries no
//! signature and is structurally valid by definition.

use crate::crypto::{public_key_from_hex, sha256, verify_signature, KeyError, KeyPair};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transaction-related errors
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Signing key does not match the transaction sender")]
    NotAuthorized,
    #[error("Unsigned transaction encountered")]
    Unsigned,
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}

/// A signed value transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Sender's public key in hex, or `None` for a system-issued
    /// reward transaction
    pub sender: Option<String>,
    /// Recipient's public key in hex
    pub recipient: String,
    /// Amount of coins transferred
    pub amount: u64,
    /// Hex-encoded compact ECDSA signature over the signing hash,
    /// absent until `sign` is called
    pub signature: Option<String>,
}

impl SignedTransaction {
    /// Create a new unsigned transaction
    pub fn new(sender: &str, recipient: &str, amount: u64) -> Self {
        Self {
            sender: Some(sender.to_string()),
            recipient: recipient.to_string(),
            amount,
            signature: None,
        }
    }

    /// Create a system-issued mining reward transaction
    pub fn reward(recipient: &str, amount: u64) -> Self {
        Self {
            sender: None,
            recipient: recipient.to_string(),
            amount,
            signature: None,
        }
    }

    /// Whether this is a system-issued reward transaction
    pub fn is_reward(&self) -> bool {
        self.sender.is_none()
    }

    /// Canonical byte encoding of `(sender, recipient, amount)`.
    /// String fields are length-prefixed so that no two distinct field
    /// triples can produce the same byte sequence.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let sender = self.sender.as_deref().unwrap_or("");
        let mut buf = Vec::with_capacity(sender.len() + self.recipient.len() + 24);
        for field in [sender, &self.recipient] {
            buf.extend_from_slice(&(field.len() as u64).to_le_bytes());
            buf.extend_from_slice(field.as_bytes());
        }
        buf.extend_from_slice(&self.amount.to_le_bytes());
        buf
    }

    /// The digest that gets signed: SHA-256 over the canonical encoding
    pub fn signing_hash(&self) -> [u8; 32] {
        sha256(&self.canonical_bytes())
    }

    /// Sign this transaction with the given key pair.
    ///
    /// Fails with [`TransactionError::NotAuthorized`] if the key pair's
    /// public key is not the transaction's sender. The transaction must
    /// not be mutated after signing; any later change makes the stored
    /// signature fail verification.
    pub fn sign(&mut self, key_pair: &KeyPair) -> Result<(), TransactionError> {
        if self.sender.as_deref() != Some(key_pair.public_key_hex().as_str()) {
            return Err(TransactionError::NotAuthorized);
        }

        let signature = key_pair.sign(&self.signing_hash())?;
        self.signature = Some(hex::encode(signature));
        Ok(())
    }

    /// Check this transaction's signature.
    ///
    /// Reward transactions are valid without a signature. A real sender
    /// with a missing or empty signature is an error
    /// ([`TransactionError::Unsigned`]); a signature that is present but
    /// does not verify yields `Ok(false)`, never an error.
    pub fn is_valid(&self) -> Result<bool, TransactionError> {
        let Some(sender) = &self.sender else {
            return Ok(true);
        };

        let signature_hex = match &self.signature {
            Some(sig) if !sig.is_empty() => sig,
            _ => return Err(TransactionError::Unsigned),
        };

        let public_key = public_key_from_hex(sender)?;
        let signature = match hex::decode(signature_hex) {
            Ok(bytes) => bytes,
            // Undecodable hex is an invalid signature, not a crash
            Err(_) => return Ok(false),
        };

        Ok(verify_signature(&public_key, &self.signing_hash(), &signature)?)
    }
}
