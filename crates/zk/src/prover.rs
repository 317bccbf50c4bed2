//! Proof generation for answer submissions.
//!
//! [`ProofGenerator`] is the only entry point the submission pipeline uses. It
//! turns plaintext inputs into a [`ProofWitness`], hands it to a
//! [`ProvingEngine`], and keeps the engine's diagnostics out of the caller's
//! log stream unless asked otherwise.
//!
//! The deployed circuit is proved by an engine supplied from outside the
//! crate. The `reference-circuit` feature adds `Groth16Engine`, which proves
//! the in-tree Poseidon circuit.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::bundle::ProofBundle;
#[cfg(feature = "reference-circuit")]
use crate::circuit::Groth16Engine;
#[cfg(feature = "reference-circuit")]
use crate::config::CircuitArtifacts;
use crate::field::{FieldElement, answer_to_field, digest_to_field, pubkey_to_field_pair};

/// Tracing target for engine-internal diagnostics.
pub const ENGINE_TARGET: &str = "zk::engine";

/// Errors that can occur during proof generation.
///
/// Only [`ProofError::WrongAnswer`] means the user's input was rejected; every
/// other variant is an infrastructure fault.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    #[error("answer does not match the round commitment")]
    WrongAnswer,

    #[error("failed to access circuit artifact {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("circuit artifacts do not match: {0}")]
    KeyMismatch(String),

    #[error("circuit synthesis failed: {0}")]
    SynthesisError(String),

    #[error("circuit proof generation failed: {0}")]
    CircuitProofError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("proving engine aborted: {0}")]
    EngineAborted(String),
}

impl ProofError {
    pub fn is_wrong_answer(&self) -> bool {
        matches!(self, Self::WrongAnswer)
    }
}

/// Encoded circuit inputs for one submission attempt.
///
/// `answer` is the private witness; the rest are public inputs.
#[derive(Clone, PartialEq, Eq)]
pub struct ProofWitness {
    pub answer: FieldElement,
    pub commitment: FieldElement,
    pub pubkey_lo: FieldElement,
    pub pubkey_hi: FieldElement,
}

impl ProofWitness {
    pub fn new(answer: &str, commitment: &[u8; 32], pubkey: &[u8; 32]) -> Self {
        let (pubkey_lo, pubkey_hi) = pubkey_to_field_pair(pubkey);
        Self {
            answer: answer_to_field(answer),
            commitment: digest_to_field(commitment),
            pubkey_lo,
            pubkey_hi,
        }
    }
}

// Keep the private answer out of logs.
impl fmt::Debug for ProofWitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofWitness")
            .field("answer", &"<redacted>")
            .field("commitment", &self.commitment)
            .field("pubkey_lo", &self.pubkey_lo)
            .field("pubkey_hi", &self.pubkey_hi)
            .finish()
    }
}

/// A proving backend for the answer circuit.
///
/// Implementations are synchronous and CPU-bound; async callers run them on a
/// blocking thread.
pub trait ProvingEngine: Send + Sync {
    fn prove(&self, witness: &ProofWitness) -> Result<ProofBundle, ProofError>;
}

/// Where a proving engine's diagnostics go while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Diagnostics {
    /// Engine events reach the caller's subscriber.
    Forward,
    /// Engine events are dropped for the duration of the call.
    #[default]
    Suppress,
}

/// Produces proof bundles for answer submissions.
#[derive(Clone)]
pub struct ProofGenerator {
    engine: Arc<dyn ProvingEngine>,
    diagnostics: Diagnostics,
}

impl ProofGenerator {
    pub fn new<E: ProvingEngine + 'static>(engine: E) -> Self {
        Self::from_arc(Arc::new(engine))
    }

    pub fn from_arc(engine: Arc<dyn ProvingEngine>) -> Self {
        Self {
            engine,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Builds a generator around the reference Groth16 engine.
    #[cfg(feature = "reference-circuit")]
    pub fn from_artifacts(artifacts: &CircuitArtifacts) -> Result<Self, ProofError> {
        Ok(Self::new(Groth16Engine::from_artifacts(artifacts)?))
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Proves knowledge of `answer` for the given commitment, bound to `pubkey`.
    ///
    /// Blocks the calling thread for the duration of proving.
    pub fn generate(
        &self,
        answer: &str,
        commitment: &[u8; 32],
        pubkey: &[u8; 32],
    ) -> Result<ProofBundle, ProofError> {
        let witness = ProofWitness::new(answer, commitment, pubkey);
        let started = Instant::now();

        let result = match self.diagnostics {
            Diagnostics::Forward => self.engine.prove(&witness),
            Diagnostics::Suppress => tracing::subscriber::with_default(
                tracing::subscriber::NoSubscriber::default(),
                || self.engine.prove(&witness),
            ),
        };

        match &result {
            Ok(_) => tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "answer proof generated"
            ),
            Err(ProofError::WrongAnswer) => tracing::info!("answer rejected by circuit"),
            Err(e) => tracing::error!(error = %e, "proof generation failed"),
        }

        result
    }
}
