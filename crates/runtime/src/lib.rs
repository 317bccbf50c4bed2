//! Answer-submission runtime for the on-chain quest.
//!
//! This crate wires the proof generator, the quest program integration and
//! the chain collaborators into a single submission pipeline. Consumers build
//! a [`SubmissionRouter`] and call [`SubmissionRouter::submit`] once per
//! attempt.
//!
//! Modules are organized by responsibility:
//! - [`quest`] reads round and answer-record state
//! - [`submission`] hosts the router, confirmation poller and reward extractor
//! - [`error`] defines the error taxonomy callers branch on
//! - [`config`] and [`clock`] carry tuning and time
//!
//! # Usage
//!
//! ```ignore
//! use runtime::{SubmissionConfig, SubmissionRouter};
//!
//! let router = SubmissionRouter::builder()
//!     .config(SubmissionConfig::from_env()?)
//!     .transport(rpc)
//!     .contract(QuestContract::from_config(&quest_config))
//!     .generator(ProofGenerator::new(engine))
//!     .relay(RelayClient::from_config(&quest_config)?)
//!     .identity(wallet_address)
//!     .build()?;
//!
//! let outcome = router.submit("paris").await?;
//! ```
pub mod clock;
pub mod config;
pub mod error;
pub mod quest;
pub mod submission;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SubmissionConfig;
pub use error::{ErrorKind, OnChainFailure, Result, SubmissionError};
pub use quest::{QuestSnapshot, QuestStateReader};
pub use submission::{
    ConfirmationPoller, RewardExtractor, RewardOutcome, SubmissionOutcome, SubmissionPath,
    SubmissionResult, SubmissionRouter, SubmissionRouterBuilder, summarize_reward,
};
