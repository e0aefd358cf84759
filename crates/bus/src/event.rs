//! Wallet notifications

use chrono::{DateTime, Utc};
use multisig_core::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Notifications emitted by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WalletEvent {
    /// Value was received
    Deposit { from: Address, amount: Amount },

    /// A new action was proposed
    Submit { action: usize },

    /// An owner approved an action
    Approve { owner: Address, action: usize },

    /// An owner withdrew an approval
    Revoke { owner: Address, action: usize },

    /// An action was executed and its call succeeded
    Execute { action: usize },
}

impl WalletEvent {
    /// Index of the action this event concerns, if any
    pub fn action(&self) -> Option<usize> {
        match self {
            WalletEvent::Deposit { .. } => None,
            WalletEvent::Submit { action }
            | WalletEvent::Approve { action, .. }
            | WalletEvent::Revoke { action, .. }
            | WalletEvent::Execute { action } => Some(*action),
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            WalletEvent::Deposit { .. } => "deposit",
            WalletEvent::Submit { .. } => "submit",
            WalletEvent::Approve { .. } => "approve",
            WalletEvent::Revoke { .. } => "revoke",
            WalletEvent::Execute { .. } => "execute",
        }
    }
}

/// An event as stored in the bus history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Position in the history, starting at 1
    pub sequence: u64,
    pub event: WalletEvent,
    pub recorded_at: DateTime<Utc>,
}
