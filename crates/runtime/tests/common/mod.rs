//! Shared fixtures for submission tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use client_blockchain_core::{
    Address, Effect, InnerEffects, MockChain, MockRelay, MockSigner, TransactionEffects,
    TransactionStatus,
};
use client_blockchain_quest::{AnswerRecord, QuestContract, QuestRound};
use runtime::{
    ManualClock, SubmissionConfig, SubmissionPath, SubmissionRouter, SubmissionRouterBuilder,
};
use zk::{
    FieldElement, ProofBundle, ProofError, ProofGenerator, ProofWitness, ProvingEngine,
    answer_commitment, answer_to_field,
};

pub const NOW: i64 = 1_700_000_000;
pub const ROUND: u64 = 12;
pub const ANSWER: &str = "paris";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

pub fn user() -> Address {
    Address::new([0x11; 32])
}

pub fn vault() -> Address {
    Address::new([0x33; 32])
}

pub fn contract() -> QuestContract {
    QuestContract::new(Address::new([0x01; 32]), Address::new([0x22; 32]), vault())
}

pub fn quest_round(deadline: i64) -> QuestRound {
    QuestRound {
        round: ROUND,
        question_id: 7,
        question_text: "Capital of France?".to_string(),
        answer_commitment: answer_commitment(ANSWER),
        deadline,
        reward_pool_total: 3_000,
        reward_slots_total: 3,
        reward_slots_filled: 0,
        active: true,
    }
}

/// Payout as the program emits it: two nested transfers to the winner and
/// one to somebody else.
pub fn winning_effects() -> TransactionEffects {
    let transfer = |destination, amount| Effect::Transfer {
        source: vault(),
        destination,
        amount,
    };
    TransactionEffects {
        instructions: vec![],
        inner_instructions: vec![
            InnerEffects {
                index: 0,
                effects: vec![transfer(user(), 500), transfer(Address::new([0x44; 32]), 1_000)],
            },
            InnerEffects {
                index: 1,
                effects: vec![transfer(user(), 300)],
            },
        ],
        log_messages: vec![
            "Program log: Instruction: SubmitAnswer".to_string(),
            "Program log: Winner #2".to_string(),
        ],
    }
}

/// Engine that accepts one answer and returns a placeholder bundle.
///
/// Optionally advances a clock while "proving" to model a slow prover.
pub struct FakeEngine {
    expected: FieldElement,
    calls: Arc<AtomicUsize>,
    slow: Option<(ManualClock, i64)>,
}

impl ProvingEngine for FakeEngine {
    fn prove(&self, witness: &ProofWitness) -> Result<ProofBundle, ProofError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((clock, seconds)) = &self.slow {
            clock.advance(*seconds);
        }
        if witness.answer == self.expected {
            Ok(ProofBundle::default())
        } else {
            Err(ProofError::WrongAnswer)
        }
    }
}

/// Chain, wallet and relay doubles around one open round.
pub struct Harness {
    pub chain: MockChain,
    pub clock: ManualClock,
    pub signer: MockSigner,
    pub relay: MockRelay,
    pub prove_calls: Arc<AtomicUsize>,
    proving_seconds: i64,
}

impl Harness {
    pub fn new(relay: MockRelay) -> Self {
        init_tracing();
        let chain = MockChain::new();
        chain.set_account(contract().round_account, quest_round(NOW + 60).encode().unwrap());
        Self {
            chain,
            clock: ManualClock::new(NOW),
            signer: MockSigner::new(user()),
            relay,
            prove_calls: Arc::new(AtomicUsize::new(0)),
            proving_seconds: 0,
        }
    }

    pub fn set_round(&self, round: QuestRound) {
        self.chain.set_account(contract().round_account, round.encode().unwrap());
    }

    pub fn set_answered(&self, round: u64) {
        self.chain.set_account(
            contract().answer_record_address(&user()),
            AnswerRecord {
                round,
                rewarded: true,
            }
            .encode().unwrap(),
        );
    }

    /// Make proving take `seconds` of wall-clock time.
    pub fn slow_prover(mut self, seconds: i64) -> Self {
        self.proving_seconds = seconds;
        self
    }

    /// Script a transaction that confirms on the second status query and pays out.
    pub fn confirm(&self, id: &str) {
        self.chain.script_status(
            id,
            vec![Ok(None), Ok(Some(TransactionStatus::confirmed()))],
        );
        self.chain.set_transaction(id, winning_effects());
    }

    pub fn prove_calls(&self) -> usize {
        self.prove_calls.load(Ordering::SeqCst)
    }

    pub fn generator(&self) -> ProofGenerator {
        ProofGenerator::new(FakeEngine {
            expected: answer_to_field(ANSWER),
            calls: self.prove_calls.clone(),
            slow: (self.proving_seconds > 0).then(|| (self.clock.clone(), self.proving_seconds)),
        })
    }

    pub fn config(path: SubmissionPath) -> SubmissionConfig {
        SubmissionConfig::default()
            .with_path(path)
            .with_poll(Duration::from_secs(3), Duration::from_secs(1))
            .with_reward_retries(3, Duration::from_secs(1))
    }

    /// Builder with chain, contract, generator, clock and identity set.
    pub fn builder(&self, path: SubmissionPath) -> SubmissionRouterBuilder {
        SubmissionRouter::builder()
            .config(Self::config(path))
            .transport(self.chain.clone())
            .contract(contract())
            .generator(self.generator())
            .clock(self.clock.clone())
            .identity(user())
    }

    pub fn router(&self, path: SubmissionPath) -> SubmissionRouter {
        self.builder(path)
            .signer(self.signer.clone())
            .relay(self.relay.clone())
            .build()
            .unwrap()
    }
}
