//! Read-only view of the on-chain quest round.
//!
//! - [`QuestStateReader`]: fetches and decodes `QuestRound` / `AnswerRecord`
//! - [`QuestSnapshot`]: the round plus derived state for one caller

mod state;

pub use state::{QuestSnapshot, QuestStateReader};
