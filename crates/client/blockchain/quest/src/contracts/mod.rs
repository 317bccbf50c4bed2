//! Quest program integration.
//!
//! - [`quest`]: account layouts and the `submit_answer` instruction
//! - [`errors`]: custom error codes

pub mod errors;
pub mod quest;

pub use errors::{ERROR_CODE_OFFSET, QuestProgramError};
pub use quest::{AnswerRecord, QuestContract, QuestRound};
