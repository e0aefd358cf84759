//! Call execution - the wallet's only outward interaction
//!
//! Once an action has reached quorum the wallet hands a `CallRequest` to a
//! `CallExecutor` and treats its `CallOutcome` as authoritative.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use multisig_core::{Address, Amount, Payload};

/// A call the wallet wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Index of the action being executed
    pub action: usize,
    pub target: Address,
    pub amount: Amount,
    pub payload: Payload,
}

/// Result reported by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The target accepted the value and call data
    Success,
    /// The call failed; no value was delivered
    Failure { reason: String },
}

impl CallOutcome {
    /// Create a failure outcome
    pub fn failure(reason: impl Into<String>) -> Self {
        CallOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success)
    }
}

/// Performs value transfers and calls on behalf of the wallet.
///
/// Implementations may call back into the wallet; by the time `call` runs
/// the action is already marked executed.
#[async_trait]
pub trait CallExecutor: Send + Sync {
    /// Executor name for logging
    fn name(&self) -> &str;

    async fn call(&self, request: &CallRequest) -> CallOutcome;
}

/// Executor that accepts every call
pub struct NoopExecutor;

#[async_trait]
impl CallExecutor for NoopExecutor {
    fn name(&self) -> &str {
        "Noop"
    }

    async fn call(&self, _request: &CallRequest) -> CallOutcome {
        CallOutcome::Success
    }
}

/// Executor that records every request
///
/// Calls to targets marked with `fail_target` report failure. Once funded,
/// it also tracks custody: a call fails when its amount exceeds the
/// remaining funds, and a successful call spends its amount.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<CallRequest>>,
    failing: Mutex<Vec<Address>>,
    funds: Mutex<Option<Amount>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call to `target` fail
    pub fn fail_target(&self, target: Address) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }

    /// Add value to the funds available for calls
    ///
    /// Returns `None` if the new total would overflow; funds are unchanged then.
    pub fn fund(&self, amount: Amount) -> Option<Amount> {
        let mut funds = self.funds.lock().unwrap_or_else(PoisonError::into_inner);
        let total = funds.unwrap_or(Amount::ZERO).checked_add(amount)?;
        *funds = Some(total);
        Some(total)
    }

    /// Remaining funds, or `None` if custody is not tracked
    pub fn funds(&self) -> Option<Amount> {
        *self.funds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests seen so far, in call order
    pub fn calls(&self) -> Vec<CallRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CallExecutor for RecordingExecutor {
    fn name(&self) -> &str {
        "Recording"
    }

    async fn call(&self, request: &CallRequest) -> CallOutcome {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let fails = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&request.target);

        if fails {
            return CallOutcome::failure(format!("call to {} reverted", request.target));
        }

        let mut funds = self.funds.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(available) = *funds {
            match available.checked_sub(request.amount) {
                Some(remaining) => *funds = Some(remaining),
                None => {
                    return CallOutcome::failure(format!(
                        "insufficient funds: have {}, need {}",
                        available, request.amount
                    ));
                }
            }
        }

        CallOutcome::Success
    }
}
