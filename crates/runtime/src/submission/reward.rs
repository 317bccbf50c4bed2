use std::sync::Arc;
use std::time::Duration;

use client_blockchain_core::{Address, ChainTransport, Effect, TransactionEffects, TransactionId};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::RewardOutcome;
use crate::config::{DEFAULT_REWARD_RETRIES, DEFAULT_REWARD_RETRY_DELAY};
use crate::error::{Result, SubmissionError};

const WINNER_MARKER: &str = "winner #";

/// Reconstructs the payout of a confirmed transaction.
#[derive(Clone)]
pub struct RewardExtractor {
    transport: Arc<dyn ChainTransport>,
    retries: u32,
    retry_delay: Duration,
}

impl RewardExtractor {
    pub fn new(transport: Arc<dyn ChainTransport>) -> Self {
        Self {
            transport,
            retries: DEFAULT_REWARD_RETRIES,
            retry_delay: DEFAULT_REWARD_RETRY_DELAY,
        }
    }

    /// `retries` is the total number of fetch attempts.
    pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Fetch `id` and sum what it paid `identity`.
    ///
    /// A transaction the indexer has not caught up with yet is retried at a
    /// fixed delay; transport failures are surfaced as-is.
    pub async fn extract_reward(
        &self,
        id: &TransactionId,
        identity: &Address,
    ) -> Result<RewardOutcome> {
        let attempts = self.retries.max(1);

        for attempt in 1..=attempts {
            if let Some(effects) = self.transport.fetch_transaction(id).await? {
                let outcome = summarize_reward(&effects, identity);
                info!(
                    transaction = %id,
                    rewarded = outcome.rewarded,
                    amount = outcome.amount,
                    winner = ?outcome.winner_ordinal,
                    "reward extracted"
                );
                return Ok(outcome);
            }

            if attempt < attempts {
                debug!(transaction = %id, attempt, "transaction not indexed yet");
                sleep(self.retry_delay).await;
            }
        }

        warn!(transaction = %id, attempts, "transaction never indexed");
        Err(SubmissionError::TransactionNotIndexed {
            transaction_id: id.clone(),
            attempts,
        })
    }
}

/// Sum of inner-instruction transfers to `identity`, plus the announced
/// winner position if the program logged one.
///
/// Top-level instructions are ignored: the reward is always paid by the
/// program through an inner transfer from the vault.
pub fn summarize_reward(effects: &TransactionEffects, identity: &Address) -> RewardOutcome {
    let amount = effects
        .inner_instructions
        .iter()
        .flat_map(|inner| inner.effects.iter())
        .filter_map(|effect| match effect {
            Effect::Transfer {
                destination,
                amount,
                ..
            } if destination == identity => Some(*amount),
            _ => None,
        })
        .fold(0u64, u64::saturating_add);

    RewardOutcome {
        rewarded: amount > 0,
        amount,
        winner_ordinal: winner_ordinal(&effects.log_messages),
    }
}

// "Program log: Winner #2 ..." -> "2"
fn winner_ordinal(logs: &[String]) -> Option<String> {
    logs.iter().find_map(|line| {
        // ASCII lowercasing keeps byte offsets valid for the original line.
        let start = line.to_ascii_lowercase().find(WINNER_MARKER)? + WINNER_MARKER.len();
        let digits: String = line[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    })
}
