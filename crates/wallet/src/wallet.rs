//! The wallet state machine

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use multisig_bus::{EventBus, WalletEvent};
use multisig_core::{Address, Amount, Payload};

use crate::action::Action;
use crate::config::WalletConfig;
use crate::error::{WalletError, WalletResult};
use crate::executor::{CallExecutor, CallOutcome, CallRequest};

/// Mutable wallet state, always accessed under one lock
#[derive(Default)]
struct WalletState {
    actions: Vec<Action>,
    /// Owners currently approving each action, indexed like `actions`
    approvals: Vec<HashSet<Address>>,
}

impl WalletState {
    fn ensure_exists(&self, index: usize) -> WalletResult<()> {
        if index < self.actions.len() {
            Ok(())
        } else {
            Err(WalletError::NotFound(index))
        }
    }

    fn ensure_not_executed(&self, index: usize) -> WalletResult<()> {
        if self.actions[index].executed {
            Err(WalletError::AlreadyExecuted(index))
        } else {
            Ok(())
        }
    }
}

/// Multi-owner approval wallet
///
/// Owners propose actions, approve or revoke them, and execute an action
/// once at least `required_approvals` owners approve it. Every operation
/// takes the authenticated caller explicitly; the wallet does no signature
/// checking of its own.
pub struct Wallet {
    owners: Vec<Address>,
    owner_set: HashSet<Address>,
    required_approvals: usize,
    state: Mutex<WalletState>,
    events: EventBus,
    executor: Arc<dyn CallExecutor>,
}

impl Wallet {
    /// Build a wallet from a validated configuration
    pub fn new(config: WalletConfig, executor: Arc<dyn CallExecutor>) -> WalletResult<Self> {
        config.validate()?;

        let owner_set = config.owners.iter().copied().collect();

        tracing::info!(
            owners = config.owners.len(),
            required = config.required_approvals,
            executor = executor.name(),
            "Wallet created"
        );

        Ok(Self {
            owners: config.owners,
            owner_set,
            required_approvals: config.required_approvals,
            state: Mutex::new(WalletState::default()),
            events: EventBus::new(config.event_channel_capacity),
            executor,
        })
    }

    /// Build a wallet from an owner list and threshold
    pub fn with_owners(
        owners: Vec<Address>,
        required_approvals: usize,
        executor: Arc<dyn CallExecutor>,
    ) -> WalletResult<Self> {
        Self::new(WalletConfig::new(owners, required_approvals), executor)
    }

    // Every critical section leaves the state consistent, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, WalletState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_owner(&self, caller: Address) -> WalletResult<()> {
        if self.owner_set.contains(&caller) {
            Ok(())
        } else {
            tracing::debug!(caller = %caller, "Rejected non-owner");
            Err(WalletError::Unauthorized(caller))
        }
    }

    fn count_approvals(&self, approvers: &HashSet<Address>) -> usize {
        self.owners.iter().filter(|o| approvers.contains(*o)).count()
    }

    // === Mutations ===

    /// Record value received from anyone
    ///
    /// Custody of the value belongs to the execution environment; the wallet
    /// only publishes the notification.
    pub fn deposit(&self, from: Address, amount: Amount) {
        let _state = self.lock();
        self.events.publish(WalletEvent::Deposit { from, amount });
        tracing::info!(from = %from, amount = %amount, "Deposit received");
    }

    /// Propose a new action
    ///
    /// The proposer's approval is not recorded. Returns the action index.
    pub fn propose(
        &self,
        caller: Address,
        target: Address,
        amount: Amount,
        payload: Payload,
    ) -> WalletResult<usize> {
        self.ensure_owner(caller)?;

        let mut state = self.lock();
        let index = state.actions.len();
        state.actions.push(Action::new(target, amount, payload));
        state.approvals.push(HashSet::new());

        self.events.publish(WalletEvent::Submit { action: index });
        tracing::info!(action = index, proposer = %caller, target = %target, amount = %amount, "Action proposed");

        Ok(index)
    }

    /// Record the caller's approval of an action
    pub fn approve(&self, caller: Address, index: usize) -> WalletResult<()> {
        self.ensure_owner(caller)?;

        let mut state = self.lock();
        state.ensure_exists(index)?;
        if state.approvals[index].contains(&caller) {
            return Err(WalletError::AlreadyApproved {
                action: index,
                owner: caller,
            });
        }
        state.ensure_not_executed(index)?;

        state.approvals[index].insert(caller);
        let approvals = self.count_approvals(&state.approvals[index]);

        self.events.publish(WalletEvent::Approve {
            owner: caller,
            action: index,
        });
        tracing::info!(
            action = index,
            owner = %caller,
            approvals,
            required = self.required_approvals,
            "Action approved"
        );

        Ok(())
    }

    /// Withdraw the caller's approval of an action
    ///
    /// Allowed at any time before execution, even when it drops the action
    /// below quorum.
    pub fn revoke(&self, caller: Address, index: usize) -> WalletResult<()> {
        self.ensure_owner(caller)?;

        let mut state = self.lock();
        state.ensure_exists(index)?;
        state.ensure_not_executed(index)?;
        if !state.approvals[index].remove(&caller) {
            return Err(WalletError::NotApproved {
                action: index,
                owner: caller,
            });
        }
        let approvals = self.count_approvals(&state.approvals[index]);

        self.events.publish(WalletEvent::Revoke {
            owner: caller,
            action: index,
        });
        tracing::info!(
            action = index,
            owner = %caller,
            approvals,
            required = self.required_approvals,
            "Approval revoked"
        );

        Ok(())
    }

    /// Execute an approved action
    ///
    /// The quorum check and the `executed` flag happen in one critical
    /// section before the executor is called. The lock is not
    /// held during the call, so a reentrant `execute` sees the action as
    /// executed and fails with `AlreadyExecuted`.
    ///
    /// The executor's outcome is authoritative. A failed call leaves the
    /// action executed; it cannot be retried.
    pub async fn execute(&self, caller: Address, index: usize) -> WalletResult<()> {
        self.ensure_owner(caller)?;

        let request = {
            let mut state = self.lock();
            state.ensure_exists(index)?;
            state.ensure_not_executed(index)?;

            let approvals = self.count_approvals(&state.approvals[index]);
            if approvals < self.required_approvals {
                tracing::warn!(
                    action = index,
                    approvals,
                    required = self.required_approvals,
                    "Execution rejected: insufficient approvals"
                );
                return Err(WalletError::InsufficientApprovals {
                    action: index,
                    approvals,
                    required: self.required_approvals,
                });
            }

            let action = &mut state.actions[index];
            action.executed = true;
            CallRequest {
                action: index,
                target: action.target,
                amount: action.amount,
                payload: action.payload.clone(),
            }
        };

        tracing::debug!(
            action = index,
            target = %request.target,
            executor = self.executor.name(),
            "Invoking call"
        );

        match self.executor.call(&request).await {
            CallOutcome::Success => {
                let _state = self.lock();
                self.events.publish(WalletEvent::Execute { action: index });
                tracing::info!(action = index, caller = %caller, "Action executed");
                Ok(())
            }
            CallOutcome::Failure { reason } => {
                tracing::warn!(action = index, reason = %reason, "Call failed; action stays executed");
                Err(WalletError::ExecutionFailed {
                    action: index,
                    reason,
                })
            }
        }
    }

    // === Queries ===

    /// Owners in configuration order
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Number of owners
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Whether `address` is in the owner set
    pub fn is_owner(&self, address: Address) -> bool {
        self.owner_set.contains(&address)
    }

    /// Approvals needed before an action may execute
    pub fn required_approvals(&self) -> usize {
        self.required_approvals
    }

    /// Snapshot of an action
    pub fn action(&self, index: usize) -> WalletResult<Action> {
        self.lock()
            .actions
            .get(index)
            .cloned()
            .ok_or(WalletError::NotFound(index))
    }

    pub fn action_count(&self) -> usize {
        self.lock().actions.len()
    }

    /// Whether `owner` currently approves the action; false for unknown actions
    pub fn is_approved(&self, index: usize, owner: Address) -> bool {
        self.lock()
            .approvals
            .get(index)
            .is_some_and(|approvers| approvers.contains(&owner))
    }

    /// Number of owners currently approving the action
    pub fn approval_count(&self, index: usize) -> WalletResult<usize> {
        let state = self.lock();
        state.ensure_exists(index)?;
        Ok(self.count_approvals(&state.approvals[index]))
    }

    /// Owners currently approving the action, in owner order
    pub fn approvers(&self, index: usize) -> WalletResult<Vec<Address>> {
        let state = self.lock();
        state.ensure_exists(index)?;
        let approvers = &state.approvals[index];
        Ok(self
            .owners
            .iter()
            .filter(|o| approvers.contains(*o))
            .copied()
            .collect())
    }

    /// Indices of actions not yet executed
    pub fn pending_actions(&self) -> Vec<usize> {
        self.lock()
            .actions
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.executed)
            .map(|(i, _)| i)
            .collect()
    }

    /// Notification log
    pub fn events(&self) -> &EventBus {
        &self.events
    }
}
