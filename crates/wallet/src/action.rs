//! Proposed actions

use multisig_core::{Address, Amount, Payload};
use serde::{Deserialize, Serialize};

/// A proposed call awaiting owner approval.
///
/// An action's identity is its index in the wallet; actions are never
/// removed, only marked executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Identity to invoke
    pub target: Address,

    /// Value sent with the call
    pub amount: Amount,

    /// Opaque call data
    pub payload: Payload,

    /// Set once, before the call is made, and never cleared
    pub executed: bool,
}

impl Action {
    pub(crate) fn new(target: Address, amount: Amount, payload: Payload) -> Self {
        Self {
            target,
            amount,
            payload,
            executed: false,
        }
    }
}
