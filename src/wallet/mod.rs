//! Wallet module for key handling and transaction creation

pub mod wallet;

pub use wallet::Wallet;
