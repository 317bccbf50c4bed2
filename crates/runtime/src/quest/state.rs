use std::sync::Arc;

use client_blockchain_core::{Address, ChainTransport};
use client_blockchain_quest::{AnswerRecord, QuestContract, QuestRound};
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SubmissionError};

/// Round state as seen by one caller at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestSnapshot {
    pub quest: QuestRound,
    pub active: bool,
    pub expired: bool,
    pub remaining_slots: u32,
    pub already_answered: bool,
    /// Clock reading the snapshot was derived from
    pub observed_at: i64,
}

impl QuestSnapshot {
    pub fn round(&self) -> u64 {
        self.quest.round
    }

    pub fn deadline(&self) -> i64 {
        self.quest.deadline
    }
}

/// Fetches and decodes the quest program's accounts.
///
/// Nothing is cached; every call reads the chain.
#[derive(Clone)]
pub struct QuestStateReader {
    transport: Arc<dyn ChainTransport>,
    contract: QuestContract,
    clock: Arc<dyn Clock>,
}

impl QuestStateReader {
    pub fn new(transport: Arc<dyn ChainTransport>, contract: QuestContract) -> Self {
        Self {
            transport,
            contract,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn contract(&self) -> &QuestContract {
        &self.contract
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Current round. A missing round account means the program was never initialized.
    pub async fn fetch_round(&self) -> Result<QuestRound> {
        let address = self.contract.round_account;
        let data = self
            .transport
            .fetch_account(&address)
            .await?
            .ok_or(SubmissionError::QuestUninitialized(address))?;

        debug!(%address, bytes = data.len(), "fetched quest round");
        QuestRound::decode(&data).map_err(SubmissionError::decode(QuestRound::ACCOUNT_NAME))
    }

    /// `identity`'s answer record, or `None` before their first accepted submission.
    pub async fn fetch_answer_record(&self, identity: &Address) -> Result<Option<AnswerRecord>> {
        let address = self.contract.answer_record_address(identity);
        let Some(data) = self.transport.fetch_account(&address).await? else {
            debug!(%identity, "no answer record");
            return Ok(None);
        };

        AnswerRecord::decode(&data)
            .map(Some)
            .map_err(SubmissionError::decode(AnswerRecord::ACCOUNT_NAME))
    }

    /// Whether `identity` already has an accepted answer for the current round.
    pub async fn has_answered(&self, identity: &Address) -> Result<bool> {
        let round = self.fetch_round().await?;
        self.answered_round(&round, identity).await
    }

    pub async fn get_quest_state(&self, identity: &Address) -> Result<QuestSnapshot> {
        let quest = self.fetch_round().await?;
        let already_answered = self.answered_round(&quest, identity).await?;
        let now = self.clock.now();

        Ok(QuestSnapshot {
            active: quest.active,
            expired: quest.is_expired(now),
            remaining_slots: quest.remaining_slots(),
            already_answered,
            observed_at: now,
            quest,
        })
    }

    async fn answered_round(&self, quest: &QuestRound, identity: &Address) -> Result<bool> {
        Ok(self
            .fetch_answer_record(identity)
            .await?
            .is_some_and(|record| record.round == quest.round))
    }
}
