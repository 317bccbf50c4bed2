//! Answer-knowledge circuit.
//!
//! Proves knowledge of an `answer` such that `Poseidon(answer)` equals the
//! round's commitment, bound to the submitting public key.
//!
//! Public inputs, in order: `[commitment, pubkey_lo, pubkey_hi]`.
//! Private witness: `answer`.

use ark_bn254::Fr as Fp254;
use ark_crypto_primitives::sponge::constraints::CryptographicSpongeVar;
use ark_crypto_primitives::sponge::poseidon::constraints::PoseidonSpongeVar;
use ark_ff::Zero;
use ark_r1cs_std::{
    alloc::AllocVar,
    eq::EqGadget,
    fields::{FieldVar, fp::FpVar},
};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use super::commitment::get_poseidon_config;
use crate::prover::ProofWitness;

/// R1CS circuit for one answer submission.
///
/// All values are `Option` so the same type serves key setup (shape only)
/// and proving (fully assigned).
#[derive(Clone)]
pub struct AnswerCircuit {
    pub commitment: Option<Fp254>,
    pub pubkey_lo: Option<Fp254>,
    pub pubkey_hi: Option<Fp254>,
    pub answer: Option<Fp254>,
}

impl AnswerCircuit {
    /// Fully assigned circuit for proving.
    pub fn new(witness: &ProofWitness) -> Self {
        Self {
            commitment: Some(witness.commitment.inner()),
            pubkey_lo: Some(witness.pubkey_lo.inner()),
            pubkey_hi: Some(witness.pubkey_hi.inner()),
            answer: Some(witness.answer.inner()),
        }
    }

    /// Zero-assigned instance used for key setup.
    ///
    /// Only the constraint shape matters during setup.
    pub fn blank() -> Self {
        Self {
            commitment: Some(Fp254::zero()),
            pubkey_lo: Some(Fp254::zero()),
            pubkey_hi: Some(Fp254::zero()),
            answer: Some(Fp254::zero()),
        }
    }

    /// Public inputs in verifier order, if assigned.
    pub fn public_inputs(&self) -> Option<Vec<Fp254>> {
        Some(vec![self.commitment?, self.pubkey_lo?, self.pubkey_hi?])
    }
}

impl ConstraintSynthesizer<Fp254> for AnswerCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fp254>) -> Result<(), SynthesisError> {
        let commitment = FpVar::new_input(cs.clone(), || {
            self.commitment.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let pubkey_lo = FpVar::new_input(cs.clone(), || {
            self.pubkey_lo.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let pubkey_hi = FpVar::new_input(cs.clone(), || {
            self.pubkey_hi.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let answer = FpVar::new_witness(cs.clone(), || {
            self.answer.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let mut sponge = PoseidonSpongeVar::new(cs.clone(), get_poseidon_config());
        sponge.absorb(&answer)?;
        let digest = sponge.squeeze_field_elements(1)?;
        digest[0].enforce_equal(&commitment)?;

        // Key limbs must appear in at least one constraint to be bound to the proof.
        let _pubkey_lo_sq = pubkey_lo.square()?;
        let _pubkey_hi_sq = pubkey_hi.square()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::commitment::answer_commitment;
    use ark_relations::r1cs::ConstraintSystem;

    fn witness(answer: &str, committed: &str) -> ProofWitness {
        ProofWitness::new(answer, &answer_commitment(committed), &[7u8; 32])
    }

    fn is_satisfied(circuit: AnswerCircuit) -> bool {
        let cs = ConstraintSystem::<Fp254>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        cs.is_satisfied().unwrap()
    }

    #[test]
    fn test_correct_answer_satisfies() {
        assert!(is_satisfied(AnswerCircuit::new(&witness("paris", "paris"))));
    }

    #[test]
    fn test_wrong_answer_unsatisfied() {
        assert!(!is_satisfied(AnswerCircuit::new(&witness("london", "paris"))));
    }

    #[test]
    fn test_public_input_count() {
        let cs = ConstraintSystem::<Fp254>::new_ref();
        AnswerCircuit::new(&witness("paris", "paris"))
            .generate_constraints(cs.clone())
            .unwrap();

        // Instance variables include the constant one.
        assert_eq!(cs.num_instance_variables(), 4);
        assert!(cs.num_witness_variables() > 1);
    }

    #[test]
    fn test_public_inputs_order() {
        let w = witness("paris", "paris");
        let inputs = AnswerCircuit::new(&w).public_inputs().unwrap();
        assert_eq!(
            inputs,
            vec![w.commitment.inner(), w.pubkey_lo.inner(), w.pubkey_hi.inner()]
        );
    }
}
