//! Chain abstraction layer for quest answer submission.
//!
//! # Architecture
//!
//! ```text
//! runtime (submission pipeline)
//!     │
//!     ├── ChainTransport     account reads, tx status, tx broadcast
//!     ├── TransactionSigner  wallet custody
//!     └── RelayTransport     gasless relay
//! ```
//!
//! Everything here is chain-agnostic: program-specific layouts and
//! instruction encoding live in `client-blockchain-quest`.
//!
//! # Feature Flags
//!
//! - `mock`: in-memory [`mock::MockChain`], [`mock::MockSigner`] and
//!   [`mock::MockRelay`] for tests in downstream crates

pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export all traits
pub use traits::{
    ChainTransport, RelayError, RelayTransport, SignerError, TransactionSigner, TransportError,
};

// Re-export all types
pub use types::{
    AccountMeta, Address, AddressParseError, Effect, ExecutionFailure, InnerEffects, Instruction,
    SignedTransaction, SubmitOptions, TransactionEffects, TransactionId, TransactionStatus,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockChain, MockRelay, MockSigner};
