//! In-memory chain collaborators for testing.
//!
//! Everything is scripted up front and every call is recorded, so tests can
//! assert both on outcomes and on what the pipeline asked for.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use zk::HexEncoding;

use crate::traits::{
    ChainTransport, RelayError, RelayTransport, SignerError, TransactionSigner, TransportError,
};
use crate::types::{
    Address, Instruction, SignedTransaction, SubmitOptions, TransactionEffects, TransactionId,
    TransactionStatus,
};

/// Scripted answer to a status query.
pub type StatusReply = Result<Option<TransactionStatus>, TransportError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Chain
// ============================================================================

struct IndexedTransaction {
    effects: TransactionEffects,
    /// Lookups that still report "not indexed"
    misses: usize,
}

#[derive(Default)]
struct ChainState {
    accounts: HashMap<Address, Vec<u8>>,
    transactions: HashMap<TransactionId, IndexedTransaction>,
    statuses: HashMap<TransactionId, VecDeque<StatusReply>>,
    submissions: Vec<(SignedTransaction, SubmitOptions)>,
    submit_error: Option<TransportError>,
    tx_counter: u64,
    account_fetches: usize,
    transaction_fetches: usize,
    status_queries: usize,
}

/// Mock chain for testing without network.
#[derive(Clone, Default)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Address, data: Vec<u8>) {
        lock(&self.state).accounts.insert(address, data);
    }

    pub fn remove_account(&self, address: &Address) {
        lock(&self.state).accounts.remove(address);
    }

    /// Status replies for `id`, consumed one per query. The last reply repeats.
    pub fn script_status(&self, id: impl Into<TransactionId>, replies: Vec<StatusReply>) {
        lock(&self.state)
            .statuses
            .insert(id.into(), replies.into_iter().collect());
    }

    pub fn set_transaction(&self, id: impl Into<TransactionId>, effects: TransactionEffects) {
        self.set_transaction_after(id, effects, 0);
    }

    /// Make `effects` visible only after `misses` lookups returned "not indexed".
    pub fn set_transaction_after(
        &self,
        id: impl Into<TransactionId>,
        effects: TransactionEffects,
        misses: usize,
    ) {
        lock(&self.state)
            .transactions
            .insert(id.into(), IndexedTransaction { effects, misses });
    }

    pub fn fail_submissions(&self, error: TransportError) {
        lock(&self.state).submit_error = Some(error);
    }

    /// Id the next accepted submission will receive.
    pub fn next_transaction_id(&self) -> TransactionId {
        Self::transaction_id(lock(&self.state).tx_counter + 1)
    }

    pub fn submissions(&self) -> Vec<(SignedTransaction, SubmitOptions)> {
        lock(&self.state).submissions.clone()
    }

    pub fn account_fetches(&self) -> usize {
        lock(&self.state).account_fetches
    }

    pub fn transaction_fetches(&self) -> usize {
        lock(&self.state).transaction_fetches
    }

    pub fn status_queries(&self) -> usize {
        lock(&self.state).status_queries
    }

    fn transaction_id(counter: u64) -> TransactionId {
        TransactionId::new(format!("mock-tx-{}", counter))
    }
}

#[async_trait]
impl ChainTransport for MockChain {
    async fn fetch_account(&self, address: &Address) -> Result<Option<Vec<u8>>, TransportError> {
        let mut state = lock(&self.state);
        state.account_fetches += 1;
        Ok(state.accounts.get(address).cloned())
    }

    async fn fetch_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionEffects>, TransportError> {
        let mut state = lock(&self.state);
        state.transaction_fetches += 1;

        match state.transactions.get_mut(id) {
            Some(indexed) if indexed.misses > 0 => {
                indexed.misses -= 1;
                Ok(None)
            }
            Some(indexed) => Ok(Some(indexed.effects.clone())),
            None => Ok(None),
        }
    }

    async fn transaction_status(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionStatus>, TransportError> {
        let mut state = lock(&self.state);
        state.status_queries += 1;

        let Some(replies) = state.statuses.get_mut(id) else {
            return Ok(None);
        };
        if replies.len() > 1 {
            replies.pop_front().unwrap_or(Ok(None))
        } else {
            replies.front().cloned().unwrap_or(Ok(None))
        }
    }

    async fn submit_transaction(
        &self,
        transaction: &SignedTransaction,
        options: SubmitOptions,
    ) -> Result<TransactionId, TransportError> {
        let mut state = lock(&self.state);
        if let Some(error) = state.submit_error.clone() {
            return Err(error);
        }

        state.submissions.push((transaction.clone(), options));
        state.tx_counter += 1;
        Ok(Self::transaction_id(state.tx_counter))
    }
}

// ============================================================================
// Signer
// ============================================================================

/// Mock wallet that "signs" by concatenating program id and instruction data.
#[derive(Clone)]
pub struct MockSigner {
    identity: Address,
    signed: Arc<Mutex<Vec<Instruction>>>,
    error: Option<SignerError>,
}

impl MockSigner {
    pub fn new(identity: Address) -> Self {
        Self {
            identity,
            signed: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn failing(identity: Address, error: SignerError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(identity)
        }
    }

    pub fn signed(&self) -> Vec<Instruction> {
        lock(&self.signed).clone()
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    fn identity(&self) -> Address {
        self.identity
    }

    async fn sign(&self, instruction: &Instruction) -> Result<SignedTransaction, SignerError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        lock(&self.signed).push(instruction.clone());

        let mut bytes = instruction.program_id.as_bytes().to_vec();
        bytes.extend_from_slice(&instruction.data);
        Ok(SignedTransaction(bytes))
    }
}

// ============================================================================
// Relay
// ============================================================================

/// Mock relay returning a fixed reply.
#[derive(Clone)]
pub struct MockRelay {
    reply: Result<TransactionId, RelayError>,
    requests: Arc<Mutex<Vec<(Address, HexEncoding)>>>,
}

impl MockRelay {
    pub fn accepting(id: impl Into<TransactionId>) -> Self {
        Self::with_reply(Ok(id.into()))
    }

    pub fn rejecting(status: u16, message: impl Into<String>) -> Self {
        Self::with_reply(Err(RelayError::Rejected {
            status,
            message: message.into(),
        }))
    }

    pub fn with_reply(reply: Result<TransactionId, RelayError>) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<(Address, HexEncoding)> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl RelayTransport for MockRelay {
    async fn submit_answer(
        &self,
        user: &Address,
        proof: &HexEncoding,
    ) -> Result<TransactionId, RelayError> {
        lock(&self.requests).push((*user, proof.clone()));
        self.reply.clone()
    }
}
