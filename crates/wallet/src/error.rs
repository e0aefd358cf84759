//! Wallet errors

use multisig_core::{Address, AddressError};
use thiserror::Error;

/// Reasons a wallet configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("At least one owner is required")]
    NoOwners,

    #[error("Required approvals must be at least 1")]
    ZeroThreshold,

    #[error("Required approvals ({required}) exceeds owner count ({owners})")]
    ThresholdTooHigh { required: usize, owners: usize },

    #[error("Zero address cannot be an owner")]
    ZeroOwner,

    #[error("Duplicate owner: {0}")]
    DuplicateOwner(Address),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: String, reason: String },

    #[error("Invalid owner address: {0}")]
    Address(#[from] AddressError),

    #[error("Event channel capacity must be between 1 and {max}, got {got}")]
    ChannelCapacity { got: usize, max: usize },
}

/// Errors from wallet operations
///
/// Every variant except `InvalidConfig` is a rejected operation; the wallet
/// is left unchanged apart from the documented `ExecutionFailed` case.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Caller {0} is not an owner")]
    Unauthorized(Address),

    #[error("Action not found: {0}")]
    NotFound(usize),

    #[error("Action {action} already approved by {owner}")]
    AlreadyApproved { action: usize, owner: Address },

    #[error("Action {0} already executed")]
    AlreadyExecuted(usize),

    #[error("Action {action} not approved by {owner}")]
    NotApproved { action: usize, owner: Address },

    #[error("Action {action} has {approvals} of {required} required approvals")]
    InsufficientApprovals {
        action: usize,
        approvals: usize,
        required: usize,
    },

    #[error("Execution of action {action} failed: {reason}")]
    ExecutionFailed { action: usize, reason: String },
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

impl WalletError {
    /// Check if the caller was rejected for not being an owner
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, WalletError::Unauthorized(_))
    }

    /// Check if the action can never be executed again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WalletError::AlreadyExecuted(_) | WalletError::ExecutionFailed { .. }
        )
    }
}
