//! Wallet configuration
//!
//! Owners and threshold are fixed for the lifetime of a wallet, so the
//! configuration is validated once, when the wallet is built.

use std::collections::HashSet;
use std::path::Path;

use multisig_bus::channel::{DEFAULT_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY};
use multisig_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_OWNERS: &str = "MULTISIG_OWNERS";
pub const ENV_REQUIRED_APPROVALS: &str = "MULTISIG_REQUIRED_APPROVALS";
pub const ENV_EVENT_CHANNEL_CAPACITY: &str = "MULTISIG_EVENT_CHANNEL_CAPACITY";

/// Configuration for a multisig wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Owner identities, in enumeration order
    pub owners: Vec<Address>,

    /// Approvals needed before an action may execute
    pub required_approvals: usize,

    /// Capacity of the live event channel
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

fn default_event_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl WalletConfig {
    pub fn new(owners: Vec<Address>, required_approvals: usize) -> Self {
        Self {
            owners,
            required_approvals,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration from `MULTISIG_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let owners_raw = lookup(ENV_OWNERS).ok_or_else(|| missing(ENV_OWNERS))?;
        let owners = owners_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Address>)
            .collect::<Result<Vec<Address>, _>>()?;

        let required_approvals = lookup(ENV_REQUIRED_APPROVALS)
            .ok_or_else(|| missing(ENV_REQUIRED_APPROVALS))
            .and_then(|v| parse_usize(ENV_REQUIRED_APPROVALS, &v))?;

        let event_channel_capacity = match lookup(ENV_EVENT_CHANNEL_CAPACITY) {
            Some(v) => parse_usize(ENV_EVENT_CHANNEL_CAPACITY, &v)?,
            None => default_event_channel_capacity(),
        };

        Ok(Self {
            owners,
            required_approvals,
            event_channel_capacity,
        })
    }

    /// Check construction rules
    ///
    /// Order: empty owner set, zero threshold, threshold above owner
    /// count, zero owner, duplicate owner, event channel capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owners.is_empty() {
            return Err(ConfigError::NoOwners);
        }

        if self.required_approvals == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        if self.required_approvals > self.owners.len() {
            return Err(ConfigError::ThresholdTooHigh {
                required: self.required_approvals,
                owners: self.owners.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.owners.len());
        for owner in &self.owners {
            if owner.is_zero() {
                return Err(ConfigError::ZeroOwner);
            }
            if !seen.insert(*owner) {
                return Err(ConfigError::DuplicateOwner(*owner));
            }
        }

        if !(1..=MAX_CHANNEL_CAPACITY).contains(&self.event_channel_capacity) {
            return Err(ConfigError::ChannelCapacity {
                got: self.event_channel_capacity,
                max: MAX_CHANNEL_CAPACITY,
            });
        }

        Ok(())
    }
}

fn missing(name: &str) -> ConfigError {
    ConfigError::Env {
        name: name.to_string(),
        reason: "not set".to_string(),
    }
}

fn parse_usize(name: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
