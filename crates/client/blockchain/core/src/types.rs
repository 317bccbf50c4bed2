//! Common types for chain interactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 32-byte account identity (public key or program-derived address).
///
/// Rendered as base58, the chain's native text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Failure to parse an [`Address`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("address must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressParseError::InvalidBase58(e.to_string()))?;
        let len = bytes.len();
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(len))?;
        Ok(Self(array))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque transaction identifier returned by the chain or the relay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Signature status of a submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub confirmed: bool,
    pub finalized: bool,
    /// Present when execution failed on-chain
    pub error: Option<ExecutionFailure>,
}

impl TransactionStatus {
    pub fn confirmed() -> Self {
        Self {
            confirmed: true,
            ..Self::default()
        }
    }

    pub fn finalized() -> Self {
        Self {
            confirmed: true,
            finalized: true,
            error: None,
        }
    }

    pub fn failed(failure: ExecutionFailure) -> Self {
        Self {
            error: Some(failure),
            ..Self::default()
        }
    }

    /// Confirmed or finalized, regardless of execution outcome.
    pub fn is_settled(&self) -> bool {
        self.confirmed || self.finalized
    }
}

/// Why a transaction failed during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    /// Index of the failing top-level instruction, if reported
    pub instruction_index: Option<u8>,
    /// Program-defined error code, if the failure was a custom program error
    pub custom_code: Option<u32>,
    /// Raw error text as reported by the chain
    pub message: String,
}

impl ExecutionFailure {
    pub fn custom(instruction_index: u8, code: u32) -> Self {
        Self {
            instruction_index: Some(instruction_index),
            custom_code: Some(code),
            message: format!("custom program error: {:#x}", code),
        }
    }
}

/// Observable effect of one executed instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Native balance transfer
    Transfer {
        source: Address,
        destination: Address,
        amount: u64,
    },
    /// Anything else, kept for diagnostics only
    Other { program: Address, kind: String },
}

/// Effects of the instructions invoked by top-level instruction `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerEffects {
    pub index: u8,
    pub effects: Vec<Effect>,
}

/// Parsed view of a confirmed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEffects {
    pub instructions: Vec<Effect>,
    pub inner_instructions: Vec<InnerEffects>,
    pub log_messages: Vec<String>,
}

/// Account reference inside an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn writable(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: false,
        }
    }
}

/// Unsigned program instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Serialized, signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction(pub Vec<u8>);

impl SignedTransaction {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Options passed with a raw transaction submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Skip the node's simulation before broadcasting
    pub skip_preflight: bool,
}
