//! Groth16 proving engine for the reference circuit.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use ark_bn254::Fr as Fp254;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use rand::rngs::OsRng;

use super::answer::AnswerCircuit;
use super::groth16::{self, Groth16Keys};
use crate::bundle::ProofBundle;
use crate::config::CircuitArtifacts;
use crate::prover::{ENGINE_TARGET, ProofError, ProofWitness, ProvingEngine};

/// Arkworks Groth16 engine for the reference answer circuit.
#[derive(Clone)]
pub struct Groth16Engine {
    keys: Arc<Groth16Keys>,
}

impl Groth16Engine {
    pub fn new(keys: Groth16Keys) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn from_artifacts(artifacts: &CircuitArtifacts) -> Result<Self, ProofError> {
        tracing::info!(
            target: ENGINE_TARGET,
            proving_key = %artifacts.proving_key.display(),
            "loading circuit artifacts"
        );
        Ok(Self::new(Groth16Keys::load(artifacts)?))
    }

    pub fn keys(&self) -> &Groth16Keys {
        &self.keys
    }

    /// Verify a bundle against the witness's public inputs.
    pub fn verify(
        &self,
        bundle: &ProofBundle,
        witness: &ProofWitness,
    ) -> Result<bool, ProofError> {
        let inputs = AnswerCircuit::new(witness)
            .public_inputs()
            .ok_or_else(|| ProofError::SynthesisError("public inputs unassigned".to_string()))?;
        groth16::verify(&bundle.to_ark(), &inputs, &self.keys.verifying_key)
    }

    fn check_satisfied(&self, circuit: &AnswerCircuit) -> Result<(), ProofError> {
        let cs = ConstraintSystem::<Fp254>::new_ref();
        circuit
            .clone()
            .generate_constraints(cs.clone())
            .map_err(|e| ProofError::SynthesisError(e.to_string()))?;

        tracing::debug!(
            target: ENGINE_TARGET,
            constraints = cs.num_constraints(),
            witnesses = cs.num_witness_variables(),
            "answer circuit synthesized"
        );

        let satisfied = cs
            .is_satisfied()
            .map_err(|e| ProofError::SynthesisError(e.to_string()))?;
        if !satisfied {
            let failing = cs.which_is_unsatisfied().ok().flatten();
            tracing::debug!(target: ENGINE_TARGET, ?failing, "answer circuit unsatisfied");
            return Err(ProofError::WrongAnswer);
        }
        Ok(())
    }
}

impl ProvingEngine for Groth16Engine {
    fn prove(&self, witness: &ProofWitness) -> Result<ProofBundle, ProofError> {
        let circuit = AnswerCircuit::new(witness);
        self.check_satisfied(&circuit)?;

        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            groth16::prove(circuit, &self.keys, &mut OsRng)
        }))
        .map_err(|payload| ProofError::EngineAborted(panic_message(payload.as_ref())))?;
        let proof = outcome?;

        tracing::debug!(
            target: ENGINE_TARGET,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "groth16 proof generated"
        );

        Ok(ProofBundle::from(&proof))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
