//! # Multisig Wallet
//!
//! A fixed set of owners jointly authorizes value transfers and calls.
//!
//! ```text
//! propose ──► Action (executed = false)
//!                │
//!   approve / revoke (per owner, toggles until executed)
//!                │
//!                ▼
//! execute ──► approvals >= threshold?
//!                │ yes
//!                ▼
//!        executed = true  (set before the call)
//!                │
//!                ▼
//!         CallExecutor::call ──► Execute event on success
//! ```
//!
//! ## Guarantees
//! - Owner set and threshold are fixed at construction
//! - Action indices are stable and never reused
//! - An action executes at most once, even under reentrant calls
//! - Every state change is published on the `EventBus`

mod action;
mod config;
mod error;
mod executor;
mod wallet;

pub use action::Action;
pub use config::WalletConfig;
pub use error::{ConfigError, WalletError, WalletResult};
pub use executor::{CallExecutor, CallOutcome, CallRequest, NoopExecutor, RecordingExecutor};
pub use wallet::Wallet;

pub use multisig_bus::{EventBus, RecordedEvent, WalletEvent};
pub use multisig_core::{Address, Amount, Payload};
