//! Answer proofs for quest submissions.
//!
//! This crate turns a plaintext answer into a Groth16 proof over BN254 that
//! the answer hashes to a round's commitment, bound to the submitter's key:
//!
//! - [`field`]: encoding of answers, digests, and public keys as field elements
//! - [`prover`]: the [`ProofGenerator`] entry point and the [`ProvingEngine`] seam
//! - [`transcode`]: byte layouts accepted by the quest program and the relay
//! - `circuit`: reference Poseidon circuit and Groth16 engine (feature-gated)
//!
//! The deployed circuit and its keys are opaque artifacts ([`CircuitArtifacts`])
//! consumed by whichever engine the caller plugs in.
//!
//! # Feature Flags
//!
//! - `reference-circuit`: in-tree answer circuit, dev key setup, `Groth16Engine`
//! - `parallel`: multi-threaded arkworks proving
//!
//! # Examples
//!
//! ```no_run
//! use zk::{ProofGenerator, ProvingEngine, transcode};
//!
//! # fn run(
//! #     engine: impl ProvingEngine + 'static,
//! #     commitment: [u8; 32],
//! #     pubkey: [u8; 32],
//! # ) -> Result<(), zk::ProofError> {
//! let generator = ProofGenerator::new(engine);
//! let bundle = generator.generate("paris", &commitment, &pubkey)?;
//! let proof = transcode(&bundle);
//! assert_eq!(proof.on_chain.as_bytes().len(), 256);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
#[cfg(feature = "reference-circuit")]
pub mod circuit;
pub mod config;
pub mod field;
pub mod prover;
pub mod transcode;

pub use bundle::{G1Point, G2Point, ProofBundle};
#[cfg(feature = "reference-circuit")]
pub use circuit::{AnswerCircuit, Groth16Engine, Groth16Keys, answer_commitment};
pub use config::CircuitArtifacts;
pub use field::{
    FieldElement, SCALAR_MODULUS, answer_to_field, digest_to_field, pubkey_to_field_pair,
};
pub use prover::{Diagnostics, ProofError, ProofGenerator, ProofWitness, ProvingEngine};
pub use transcode::{
    HexEncoding, OnChainEncoding, PROOF_LEN, TranscodeError, TranscodedProof, to_hex_encoding,
    to_on_chain_encoding, transcode,
};
