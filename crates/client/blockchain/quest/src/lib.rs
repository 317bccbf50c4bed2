//! Quest program integration for answer submission.
//!
//! This crate knows the quest program's wire formats; it performs no I/O of
//! its own except the relay HTTP client:
//! - Borsh account layouts for `QuestRound` / `AnswerRecord`
//! - Answer-record PDA derivation and `submit_answer` instruction construction
//! - Custom program error decoding
//! - Gasless relay client
//!
//! # Architecture
//!
//! ```text
//! zk (OnChainEncoding / HexEncoding)
//!     │
//!     ├── contracts::QuestContract ──▶ Instruction ──▶ TransactionSigner
//!     └── relay::RelayClient ──▶ POST /submit-answer
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_quest::{QuestConfig, QuestContract, RelayClient};
//!
//! let config = QuestConfig::from_env()?;
//! let contract = QuestContract::from_config(&config);
//! let relay = RelayClient::from_config(&config)?;
//! ```

pub mod codec;
pub mod config;
pub mod contracts;
pub mod relay;

pub use codec::{CodecError, decode_account, encode_account};
pub use config::{ConfigError, QuestConfig};
pub use contracts::{AnswerRecord, QuestContract, QuestProgramError, QuestRound};
pub use relay::RelayClient;
