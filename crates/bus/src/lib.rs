//! Multisig Event Bus - ordered notification log
//!
//! Every state change of the wallet is published here as a `WalletEvent`.
//!
//! # Features
//! - Append-only history with gap-free sequence numbers
//! - Live fan-out over a tokio broadcast channel
//! - `EventSubscriber` trait for replaying the history into a handler

pub mod channel;
pub mod error;
pub mod event;
pub mod subscriber;

pub use channel::EventBus;
pub use error::BusError;
pub use event::{RecordedEvent, WalletEvent};
pub use subscriber::EventSubscriber;
