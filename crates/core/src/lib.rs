//! Multisig Core - Domain types
//!
//! This crate contains the value types shared by the wallet crates:
//! - `Address`: 20-byte identity of owners, depositors and call targets
//! - `Amount`: Non-negative decimal value held by or sent from the wallet
//! - `Payload`: Opaque call data forwarded to a target

pub mod address;
pub mod amount;
pub mod payload;

pub use address::{Address, AddressError};
pub use amount::{Amount, AmountError};
pub use payload::Payload;
