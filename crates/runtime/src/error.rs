//! Error taxonomy for the submission pipeline.
//!
//! Every failure surfaced to callers is a [`SubmissionError`], and every
//! variant maps to a stable [`ErrorKind`] whose [`ErrorKind::code`] string is
//! safe to branch on, log, or forward to telemetry.

use std::fmt;
use std::time::Duration;

use client_blockchain_core::{Address, ExecutionFailure, SignerError, TransactionId, TransportError};
use client_blockchain_quest::{CodecError, ConfigError, QuestProgramError};
use thiserror::Error;
use zk::ProofError;

pub type Result<T> = std::result::Result<T, SubmissionError>;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("quest round account {0} not found")]
    QuestUninitialized(Address),

    #[error("round {round} is not accepting answers")]
    QuestInactive { round: u64 },

    #[error("round {round} closed at {deadline}")]
    QuestExpired { round: u64, deadline: i64 },

    #[error("round {round} already answered")]
    AlreadyAnswered { round: u64 },

    #[error("answer does not match the round commitment")]
    WrongAnswer,

    #[error("proof generation failed")]
    ProofInfrastructure(#[source] ProofError),

    #[error("transaction {transaction_id} failed on chain: {failure}")]
    OnChainExecution {
        transaction_id: TransactionId,
        failure: OnChainFailure,
    },

    #[error("relay submission failed: {message}")]
    RelaySubmission { status: Option<u16>, message: String },

    #[error("transaction {transaction_id} not confirmed within {timeout:?}")]
    ConfirmationTimeout {
        transaction_id: TransactionId,
        timeout: Duration,
        /// Last transport failure seen while polling, if any
        last_error: Option<TransportError>,
    },

    #[error("transaction {transaction_id} not indexed after {attempts} attempts")]
    TransactionNotIndexed {
        transaction_id: TransactionId,
        attempts: u32,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error("failed to decode {account} account")]
    Decode {
        account: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SubmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::QuestUninitialized(_) => ErrorKind::QuestUninitialized,
            Self::QuestInactive { .. } => ErrorKind::QuestInactive,
            Self::QuestExpired { .. } => ErrorKind::QuestExpired,
            Self::AlreadyAnswered { .. } => ErrorKind::AlreadyAnswered,
            Self::WrongAnswer => ErrorKind::WrongAnswer,
            Self::ProofInfrastructure(_) => ErrorKind::ProofInfrastructure,
            Self::OnChainExecution { .. } => ErrorKind::OnChainExecution,
            Self::RelaySubmission { .. } => ErrorKind::RelaySubmission,
            Self::ConfirmationTimeout { .. } => ErrorKind::ConfirmationTimeout,
            Self::TransactionNotIndexed { .. } => ErrorKind::TransactionNotIndexed,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Signer(_) => ErrorKind::Signer,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// `false` only for outcomes that leave the caller where they wanted to be.
    pub fn is_failure(&self) -> bool {
        self.kind().is_failure()
    }

    /// Decoded program error behind an on-chain failure, if known.
    pub fn program_error(&self) -> Option<QuestProgramError> {
        match self {
            Self::OnChainExecution { failure, .. } => failure.program_error,
            _ => None,
        }
    }

    pub(crate) fn decode(account: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| Self::Decode { account, source }
    }
}

impl From<ProofError> for SubmissionError {
    fn from(error: ProofError) -> Self {
        if error.is_wrong_answer() {
            Self::WrongAnswer
        } else {
            Self::ProofInfrastructure(error)
        }
    }
}

impl From<ConfigError> for SubmissionError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Stable classification of a [`SubmissionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    QuestUninitialized,
    QuestInactive,
    QuestExpired,
    AlreadyAnswered,
    WrongAnswer,
    ProofInfrastructure,
    OnChainExecution,
    RelaySubmission,
    ConfirmationTimeout,
    TransactionNotIndexed,
    Transport,
    Signer,
    Decode,
    Config,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::QuestUninitialized => "QUEST_UNINITIALIZED",
            Self::QuestInactive => "QUEST_INACTIVE",
            Self::QuestExpired => "QUEST_EXPIRED",
            Self::AlreadyAnswered => "ALREADY_ANSWERED",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::ProofInfrastructure => "PROOF_INFRASTRUCTURE",
            Self::OnChainExecution => "ON_CHAIN_EXECUTION",
            Self::RelaySubmission => "RELAY_SUBMISSION",
            Self::ConfirmationTimeout => "CONFIRMATION_TIMEOUT",
            Self::TransactionNotIndexed => "TRANSACTION_NOT_INDEXED",
            Self::Transport => "TRANSPORT",
            Self::Signer => "SIGNER",
            Self::Decode => "DECODE",
            Self::Config => "CONFIG",
        }
    }

    pub fn is_failure(self) -> bool {
        !matches!(self, Self::AlreadyAnswered)
    }

    /// The same attempt may succeed with a corrected answer.
    pub fn is_retryable_with_new_answer(self) -> bool {
        matches!(self, Self::WrongAnswer)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Execution failure reported by the chain, with the program error decoded
/// when its custom code is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainFailure {
    pub failure: ExecutionFailure,
    pub program_error: Option<QuestProgramError>,
}

impl OnChainFailure {
    pub fn new(failure: ExecutionFailure) -> Self {
        let program_error = failure.custom_code.and_then(QuestProgramError::from_code);
        Self {
            failure,
            program_error,
        }
    }

    /// Program error symbol, e.g. `ALREADY_ANSWERED`.
    pub fn symbol(&self) -> Option<&'static str> {
        self.program_error.map(QuestProgramError::symbol)
    }
}

impl fmt::Display for OnChainFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.program_error {
            Some(program_error) => write!(f, "{}", program_error),
            None => match self.failure.custom_code {
                Some(code) => write!(f, "custom error {}: {}", code, self.failure.message),
                None => f.write_str(&self.failure.message),
            },
        }
    }
}
