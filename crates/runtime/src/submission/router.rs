use std::sync::Arc;

use client_blockchain_core::{
    Address, ChainTransport, RelayError, RelayTransport, SubmitOptions, TransactionId,
    TransactionSigner,
};
use client_blockchain_quest::QuestContract;
use tracing::{debug, info, warn};
use zk::{HexEncoding, OnChainEncoding, ProofBundle, ProofError, ProofGenerator, transcode};

use super::{
    ConfirmationPoller, RewardExtractor, SubmissionOutcome, SubmissionPath, SubmissionResult,
};
use crate::clock::{Clock, SystemClock};
use crate::config::SubmissionConfig;
use crate::error::{Result, SubmissionError};
use crate::quest::{QuestSnapshot, QuestStateReader};

/// Drives one answer from plaintext to a confirmed, reward-checked transaction.
///
/// Every call to [`SubmissionRouter::submit`] is an independent attempt:
/// round state is re-read, nothing is cached between calls.
#[derive(Clone)]
pub struct SubmissionRouter {
    reader: QuestStateReader,
    generator: ProofGenerator,
    transport: Arc<dyn ChainTransport>,
    signer: Option<Arc<dyn TransactionSigner>>,
    relay: Option<Arc<dyn RelayTransport>>,
    identity: Address,
    poller: ConfirmationPoller,
    extractor: RewardExtractor,
    clock: Arc<dyn Clock>,
    path: SubmissionPath,
}

impl SubmissionRouter {
    pub fn builder() -> SubmissionRouterBuilder {
        SubmissionRouterBuilder::new()
    }

    pub fn identity(&self) -> Address {
        self.identity
    }

    pub fn reader(&self) -> &QuestStateReader {
        &self.reader
    }

    /// Submit over the configured path.
    pub async fn submit(&self, answer: &str) -> Result<SubmissionOutcome> {
        self.submit_via(answer, self.path).await
    }

    pub async fn submit_via(
        &self,
        answer: &str,
        path: SubmissionPath,
    ) -> Result<SubmissionOutcome> {
        let dispatch = self.dispatcher(path)?;
        let snapshot = self.reader.get_quest_state(&self.identity).await?;
        Self::check_round(&snapshot)?;

        info!(
            round = snapshot.round(),
            %path,
            remaining_slots = snapshot.remaining_slots,
            "round open, generating proof"
        );
        let bundle = self.prove(answer, snapshot.quest.answer_commitment).await?;
        let proof = transcode(&bundle);

        // Proving can outlast the round.
        let now = self.clock.now();
        if snapshot.quest.is_expired(now) {
            warn!(
                round = snapshot.round(),
                deadline = snapshot.deadline(),
                now,
                "round closed while proving"
            );
            return Err(SubmissionError::QuestExpired {
                round: snapshot.round(),
                deadline: snapshot.deadline(),
            });
        }

        let transaction_id = match dispatch {
            Dispatch::Direct(signer) => self.submit_direct(signer, &proof.on_chain).await?,
            Dispatch::Relay(relay) => self.submit_relay(relay, &proof.hex).await?,
        };
        info!(transaction = %transaction_id, %path, "answer submitted");

        self.poller.poll_until_confirmed(&transaction_id).await?;
        let reward = self
            .extractor
            .extract_reward(&transaction_id, &self.identity)
            .await?;

        Ok(SubmissionOutcome {
            submission: SubmissionResult {
                path,
                transaction_id,
            },
            reward,
        })
    }

    fn dispatcher(&self, path: SubmissionPath) -> Result<Dispatch<'_>> {
        let dispatch = match path {
            SubmissionPath::Direct => self.signer.as_deref().map(Dispatch::Direct),
            SubmissionPath::Relay => self.relay.as_deref().map(Dispatch::Relay),
        };
        dispatch.ok_or_else(|| missing_collaborator(path))
    }

    fn check_round(snapshot: &QuestSnapshot) -> Result<()> {
        let round = snapshot.round();
        if !snapshot.active {
            return Err(SubmissionError::QuestInactive { round });
        }
        if snapshot.expired {
            return Err(SubmissionError::QuestExpired {
                round,
                deadline: snapshot.deadline(),
            });
        }
        if snapshot.already_answered {
            info!(round, "round already answered, skipping");
            return Err(SubmissionError::AlreadyAnswered { round });
        }
        Ok(())
    }

    async fn prove(&self, answer: &str, commitment: [u8; 32]) -> Result<ProofBundle> {
        let generator = self.generator.clone();
        let answer = answer.to_owned();
        let pubkey = self.identity.to_bytes();

        tokio::task::spawn_blocking(move || generator.generate(&answer, &commitment, &pubkey))
            .await
            .map_err(|e| {
                SubmissionError::ProofInfrastructure(ProofError::EngineAborted(format!(
                    "proving task failed: {}",
                    e
                )))
            })?
            .map_err(SubmissionError::from)
    }

    async fn submit_direct(
        &self,
        signer: &dyn TransactionSigner,
        proof: &OnChainEncoding,
    ) -> Result<TransactionId> {
        let instruction = self
            .reader
            .contract()
            .submit_answer(&self.identity, proof);
        debug!(data_len = instruction.data.len(), "signing submit_answer");

        let transaction = signer.sign(&instruction).await?;
        // No preflight simulation and no local balance check.
        let options = SubmitOptions {
            skip_preflight: true,
        };
        Ok(self.transport.submit_transaction(&transaction, options).await?)
    }

    async fn submit_relay(
        &self,
        relay: &dyn RelayTransport,
        proof: &HexEncoding,
    ) -> Result<TransactionId> {
        relay
            .submit_answer(&self.identity, proof)
            .await
            .map_err(|e| {
                warn!(error = %e, "relay refused submission");
                match e {
                    RelayError::Rejected { status, message } => SubmissionError::RelaySubmission {
                        status: Some(status),
                        message,
                    },
                    other => SubmissionError::RelaySubmission {
                        status: None,
                        message: other.to_string(),
                    },
                }
            })
    }
}

enum Dispatch<'a> {
    Direct(&'a dyn TransactionSigner),
    Relay(&'a dyn RelayTransport),
}

fn missing_collaborator(path: SubmissionPath) -> SubmissionError {
    let needed = match path {
        SubmissionPath::Direct => "a signer",
        SubmissionPath::Relay => "a relay",
    };
    SubmissionError::Config(format!("{} submission requires {}", path, needed))
}

/// Builder for [`SubmissionRouter`].
pub struct SubmissionRouterBuilder {
    config: SubmissionConfig,
    transport: Option<Arc<dyn ChainTransport>>,
    contract: Option<QuestContract>,
    generator: Option<ProofGenerator>,
    signer: Option<Arc<dyn TransactionSigner>>,
    relay: Option<Arc<dyn RelayTransport>>,
    identity: Option<Address>,
    clock: Option<Arc<dyn Clock>>,
}

impl SubmissionRouterBuilder {
    fn new() -> Self {
        Self {
            config: SubmissionConfig::default(),
            transport: None,
            contract: None,
            generator: None,
            signer: None,
            relay: None,
            identity: None,
            clock: None,
        }
    }

    /// Override submission configuration
    pub fn config(mut self, config: SubmissionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transport(mut self, transport: impl ChainTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn transport_arc(mut self, transport: Arc<dyn ChainTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn contract(mut self, contract: QuestContract) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Proof generator; its diagnostics are replaced by the configured ones.
    pub fn generator(mut self, generator: ProofGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Signer for the direct path. Also supplies the identity unless one is set.
    pub fn signer(mut self, signer: impl TransactionSigner + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    pub fn relay(mut self, relay: impl RelayTransport + 'static) -> Self {
        self.relay = Some(Arc::new(relay));
        self
    }

    /// Identity proofs are bound to and rewards are attributed to.
    pub fn identity(mut self, identity: Address) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn build(self) -> Result<SubmissionRouter> {
        self.config.validate()?;

        let transport = self
            .transport
            .ok_or_else(|| SubmissionError::Config("chain transport not set".into()))?;
        let contract = self
            .contract
            .ok_or_else(|| SubmissionError::Config("quest contract not set".into()))?;
        let generator = self
            .generator
            .ok_or_else(|| SubmissionError::Config("proof generator not set".into()))?
            .with_diagnostics(self.config.diagnostics);
        let identity = self
            .identity
            .or_else(|| self.signer.as_ref().map(|signer| signer.identity()))
            .ok_or_else(|| SubmissionError::Config("submitter identity not set".into()))?;

        if let Some(signer) = &self.signer {
            if signer.identity() != identity {
                return Err(SubmissionError::Config(format!(
                    "signer identity {} does not match submitter {}",
                    signer.identity(),
                    identity
                )));
            }
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let reader = QuestStateReader::new(transport.clone(), contract).with_clock(clock.clone());
        let poller = ConfirmationPoller::new(transport.clone())
            .with_timing(self.config.poll_timeout, self.config.poll_interval);
        let extractor = RewardExtractor::new(transport.clone())
            .with_retries(self.config.reward_retries, self.config.reward_retry_delay);

        Ok(SubmissionRouter {
            reader,
            generator,
            transport,
            signer: self.signer,
            relay: self.relay,
            identity,
            poller,
            extractor,
            clock,
            path: self.config.path,
        })
    }
}
