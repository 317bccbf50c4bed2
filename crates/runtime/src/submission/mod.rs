//! Answer submission: proving, dispatch, confirmation and reward extraction.
//!
//! ```text
//! SubmissionRouter
//!     ├── QuestStateReader     pre-flight round checks
//!     ├── ProofGenerator       blocking pool
//!     ├── Direct | Relay       dispatch
//!     ├── ConfirmationPoller   fixed-interval status polling
//!     └── RewardExtractor      inner-instruction transfer scan
//! ```

mod poller;
mod reward;
mod router;

use std::fmt;
use std::str::FromStr;

use client_blockchain_core::TransactionId;
use serde::{Deserialize, Serialize};

pub use poller::ConfirmationPoller;
pub use reward::{RewardExtractor, summarize_reward};
pub use router::{SubmissionRouter, SubmissionRouterBuilder};

/// How a proof reaches the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPath {
    /// Caller signs and pays for the transaction
    Direct,
    /// Gasless relay signs and pays
    #[default]
    Relay,
}

impl fmt::Display for SubmissionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Relay => f.write_str("relay"),
        }
    }
}

impl FromStr for SubmissionPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "relay" => Ok(Self::Relay),
            other => Err(format!("unknown submission path {:?}", other)),
        }
    }
}

/// A transaction that reached the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub path: SubmissionPath,
    pub transaction_id: TransactionId,
}

/// What the confirmed transaction paid the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub rewarded: bool,
    pub amount: u64,
    /// Winner position announced by the program, e.g. `"2"`
    pub winner_ordinal: Option<String>,
}

/// Result of a complete submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub submission: SubmissionResult,
    pub reward: RewardOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parse() {
        assert_eq!("direct".parse::<SubmissionPath>(), Ok(SubmissionPath::Direct));
        assert_eq!("Relay".parse::<SubmissionPath>(), Ok(SubmissionPath::Relay));
        assert!("carrier-pigeon".parse::<SubmissionPath>().is_err());
        assert_eq!(SubmissionPath::default(), SubmissionPath::Relay);
    }

    #[test]
    fn test_outcome_serializes_transaction_id() {
        let outcome = SubmissionOutcome {
            submission: SubmissionResult {
                path: SubmissionPath::Direct,
                transaction_id: TransactionId::new("sig-1"),
            },
            reward: RewardOutcome::default(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["submission"]["path"], "direct");
        assert_eq!(json["submission"]["transaction_id"], "sig-1");
    }
}
