//! Quest program error codes.
//!
//! Custom program errors start at 6000 and follow declaration order in the
//! program's error enum.

use std::fmt;

/// First custom error code emitted by the program.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Errors the quest program can fail a transaction with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestProgramError {
    Unauthorized,
    PoolNotActive,
    DeadlineExpired,
    InvalidProof,
    InvalidDeadline,
    InsufficientReward,
    InsufficientPoolBalance,
    QuestionTooLong,
    AlreadyAnswered,
}

impl QuestProgramError {
    const ALL: [Self; 9] = [
        Self::Unauthorized,
        Self::PoolNotActive,
        Self::DeadlineExpired,
        Self::InvalidProof,
        Self::InvalidDeadline,
        Self::InsufficientReward,
        Self::InsufficientPoolBalance,
        Self::QuestionTooLong,
        Self::AlreadyAnswered,
    ];

    /// Decode a custom error code; `None` for codes this client does not know.
    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn code(self) -> u32 {
        ERROR_CODE_OFFSET + self as u32
    }

    /// Stable symbolic name callers can branch on.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::PoolNotActive => "POOL_NOT_ACTIVE",
            Self::DeadlineExpired => "DEADLINE_EXPIRED",
            Self::InvalidProof => "INVALID_PROOF",
            Self::InvalidDeadline => "INVALID_DEADLINE",
            Self::InsufficientReward => "INSUFFICIENT_REWARD",
            Self::InsufficientPoolBalance => "INSUFFICIENT_POOL_BALANCE",
            Self::QuestionTooLong => "QUESTION_TOO_LONG",
            Self::AlreadyAnswered => "ALREADY_ANSWERED",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Unauthorized => "signer is not authorized for this action",
            Self::PoolNotActive => "reward pool is not active",
            Self::DeadlineExpired => "round deadline has passed",
            Self::InvalidProof => "answer proof failed verification",
            Self::InvalidDeadline => "round deadline is invalid",
            Self::InsufficientReward => "reward is below the minimum",
            Self::InsufficientPoolBalance => "reward pool balance is exhausted",
            Self::QuestionTooLong => "question text exceeds the maximum length",
            Self::AlreadyAnswered => "answer already submitted for this round",
        }
    }
}

impl fmt::Display for QuestProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.symbol(), self.code(), self.message())
    }
}

impl std::error::Error for QuestProgramError {}
