//! Submission pipeline configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use client_blockchain_quest::ConfigError;
use zk::Diagnostics;

use crate::submission::SubmissionPath;

pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_REWARD_RETRIES: u32 = 5;
pub const DEFAULT_REWARD_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Tuning for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// Path used by [`crate::SubmissionRouter::submit`]
    pub path: SubmissionPath,

    /// Give up waiting for confirmation after this long
    pub poll_timeout: Duration,

    /// Fixed delay between status queries
    pub poll_interval: Duration,

    /// Transaction fetch attempts before the reward is reported unindexed
    pub reward_retries: u32,

    /// Fixed delay between transaction fetch attempts
    pub reward_retry_delay: Duration,

    /// Routing of proving-engine diagnostics
    pub diagnostics: Diagnostics,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            path: SubmissionPath::Relay,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            reward_retries: DEFAULT_REWARD_RETRIES,
            reward_retry_delay: DEFAULT_REWARD_RETRY_DELAY,
            diagnostics: Diagnostics::Suppress,
        }
    }
}

impl SubmissionConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables (all optional):
    /// - `QUEST_SUBMISSION_PATH` - `direct` or `relay` (default: relay)
    /// - `QUEST_POLL_TIMEOUT_SECS` - confirmation timeout (default: 15)
    /// - `QUEST_POLL_INTERVAL_MS` - status polling interval (default: 1000)
    /// - `QUEST_REWARD_RETRIES` - transaction fetch attempts (default: 5)
    /// - `QUEST_REWARD_RETRY_DELAY_MS` - delay between fetches (default: 1000)
    /// - `QUEST_SUPPRESS_PROVER_OUTPUT` - drop proving-engine logs (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = parse_var::<SubmissionPath>("QUEST_SUBMISSION_PATH")? {
            config.path = path;
        }
        if let Some(secs) = parse_var::<u64>("QUEST_POLL_TIMEOUT_SECS")? {
            config.poll_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>("QUEST_POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var::<u32>("QUEST_REWARD_RETRIES")? {
            config.reward_retries = retries;
        }
        if let Some(ms) = parse_var::<u64>("QUEST_REWARD_RETRY_DELAY_MS")? {
            config.reward_retry_delay = Duration::from_millis(ms);
        }
        if let Some(suppress) = read_var("QUEST_SUPPRESS_PROVER_OUTPUT") {
            config.diagnostics = if parse_flag("QUEST_SUPPRESS_PROVER_OUTPUT", &suppress)? {
                Diagnostics::Suppress
            } else {
                Diagnostics::Forward
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_path(mut self, path: SubmissionPath) -> Self {
        self.path = path;
        self
    }

    pub fn with_poll(mut self, timeout: Duration, interval: Duration) -> Self {
        self.poll_timeout = timeout;
        self.poll_interval = interval;
        self
    }

    pub fn with_reward_retries(mut self, retries: u32, delay: Duration) -> Self {
        self.reward_retries = retries;
        self.reward_retry_delay = delay;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "QUEST_POLL_INTERVAL_MS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.reward_retries == 0 {
            return Err(ConfigError::Invalid {
                var: "QUEST_REWARD_RETRIES",
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(())
    }
}

fn read_var(var: &'static str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    read_var(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}
