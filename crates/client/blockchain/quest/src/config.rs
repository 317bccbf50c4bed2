//! Quest program configuration.

use std::env;
use std::time::Duration;

use client_blockchain_core::Address;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787";
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Addresses of the deployed quest program and its relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestConfig {
    /// Quest program id
    pub program_id: Address,

    /// Singleton round account
    pub round_account: Address,

    /// Reward vault paying out winners
    pub vault_account: Address,

    /// Gasless relay base URL
    pub relay_url: String,

    /// Per-request relay timeout
    pub relay_timeout: Duration,
}

impl QuestConfig {
    pub fn new(program_id: Address, round_account: Address, vault_account: Address) -> Self {
        Self {
            program_id,
            round_account,
            vault_account,
            relay_url: DEFAULT_RELAY_URL.to_string(),
            relay_timeout: DEFAULT_RELAY_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUEST_PROGRAM_ID` - Quest program address (hex)
    /// - `QUEST_ROUND_ACCOUNT` - Round account address (hex)
    /// - `QUEST_VAULT_ACCOUNT` - Reward vault address (hex)
    /// - `QUEST_RELAY_URL` - Relay base URL (default: http://127.0.0.1:8787)
    /// - `QUEST_RELAY_TIMEOUT_SECS` - Relay request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            address_var("QUEST_PROGRAM_ID")?,
            address_var("QUEST_ROUND_ACCOUNT")?,
            address_var("QUEST_VAULT_ACCOUNT")?,
        );

        if let Ok(url) = env::var("QUEST_RELAY_URL") {
            config.relay_url = url;
        }

        if let Ok(secs) = env::var("QUEST_RELAY_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "QUEST_RELAY_TIMEOUT_SECS",
                reason: e.to_string(),
            })?;
            config.relay_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set relay URL.
    pub fn with_relay_url(mut self, url: impl Into<String>) -> Self {
        self.relay_url = url.into();
        self
    }

    /// Set relay timeout.
    pub fn with_relay_timeout(mut self, timeout: Duration) -> Self {
        self.relay_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.relay_url.starts_with("http://") && !self.relay_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "QUEST_RELAY_URL",
                reason: format!("invalid URL format: {}", self.relay_url),
            });
        }

        if self.relay_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "QUEST_RELAY_TIMEOUT_SECS",
                reason: "timeout must be greater than 0".to_string(),
            });
        }

        if self.round_account == self.vault_account {
            return Err(ConfigError::Invalid {
                var: "QUEST_VAULT_ACCOUNT",
                reason: "vault must differ from the round account".to_string(),
            });
        }

        Ok(())
    }
}

fn address_var(var: &'static str) -> Result<Address, ConfigError> {
    let value = env::var(var).map_err(|_| ConfigError::Missing(var))?;
    value.parse().map_err(|e: client_blockchain_core::AddressParseError| {
        ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }
    })
}
