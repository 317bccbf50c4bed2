//! Arkworks answer circuit.
//!
//! ```text
//! answer (private) ──Poseidon──▶ == commitment (public)
//! pubkey_lo, pubkey_hi (public) ──bound──▶ proof
//! ```
//!
//! - [`commitment`]: native Poseidon hash shared with the circuit
//! - [`answer`]: R1CS constraints for the answer proof
//! - [`groth16`]: key handling, proving, and verification on BN254
//! - [`engine`]: [`Groth16Engine`], a `ProvingEngine` over this circuit
//!
//! This is a reference circuit for tests and local networks. Deployments
//! prove against their own compiled circuit through a custom engine.

pub mod answer;
pub mod commitment;
pub mod engine;
pub mod groth16;

pub use answer::AnswerCircuit;
pub use commitment::{answer_commitment, get_poseidon_config, hash_one};
pub use engine::Groth16Engine;
pub use groth16::Groth16Keys;
