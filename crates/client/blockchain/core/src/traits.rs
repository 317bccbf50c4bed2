//! Chain collaborator traits.
//!
//! The submission pipeline talks to the outside world only through these
//! seams:
//! - [`ChainTransport`]: raw reads and transaction broadcast
//! - [`TransactionSigner`]: wallet custody (keys never enter this workspace)
//! - [`RelayTransport`]: the gasless relay service

use async_trait::async_trait;
use zk::HexEncoding;

use crate::types::{
    Address, Instruction, SignedTransaction, SubmitOptions, TransactionEffects, TransactionId,
    TransactionStatus,
};

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
///
/// "Not found" is not an error at this layer; lookups return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// Wallet signing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    #[error("Signer unavailable: {0}")]
    Unavailable(String),

    #[error("Signing rejected: {0}")]
    Rejected(String),
}

/// Relay submission errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// Non-2xx response. `message` is the relay's `error` field, or
    /// `HTTP <status>` when the body carried none.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Relay unreachable: {0}")]
    NetworkError(String),

    #[error("Invalid relay response: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// Collaborators
// ============================================================================

/// Pure chain infrastructure layer.
#[async_trait]
pub trait ChainTransport: Send + Sync {
    /// Raw account data, or `None` if the account does not exist.
    async fn fetch_account(&self, address: &Address) -> Result<Option<Vec<u8>>, TransportError>;

    /// Parsed transaction, or `None` if it is not (yet) indexed.
    async fn fetch_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionEffects>, TransportError>;

    /// Signature status, or `None` if the node has not seen the transaction.
    async fn transaction_status(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionStatus>, TransportError>;

    /// Broadcast a signed transaction.
    async fn submit_transaction(
        &self,
        transaction: &SignedTransaction,
        options: SubmitOptions,
    ) -> Result<TransactionId, TransportError>;
}

/// Wallet signer.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Identity the signer signs for.
    fn identity(&self) -> Address;

    /// Wrap `instruction` in a transaction paid for and signed by [`Self::identity`].
    async fn sign(&self, instruction: &Instruction) -> Result<SignedTransaction, SignerError>;
}

/// Gasless relay that submits answers on the user's behalf.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Hand a proof to the relay and return the transaction id it broadcast.
    async fn submit_answer(
        &self,
        user: &Address,
        proof: &HexEncoding,
    ) -> Result<TransactionId, RelayError>;
}
