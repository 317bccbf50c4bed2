//! Groth16 keys, proving and verification for the answer circuit (BN254).

use std::fs;
use std::path::Path;

use ark_bn254::{Bn254, Fr as Fp254};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::ConstraintSynthesizer;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;

use super::answer::AnswerCircuit;
use crate::config::CircuitArtifacts;
use crate::prover::ProofError;

/// Key pair for the answer circuit.
///
/// The verifying key is always the one embedded in the proving key; an
/// externally supplied verifying key is only checked against it.
#[derive(Clone)]
pub struct Groth16Keys {
    pub proving_key: ProvingKey<Bn254>,
    /// Mirrored by the quest program's on-chain verifier
    pub verifying_key: VerifyingKey<Bn254>,
}

impl Groth16Keys {
    /// Circuit-specific setup with local randomness.
    ///
    /// Only for development and tests: whoever holds `rng`'s state can forge
    /// proofs. Deployed keys are loaded with [`Groth16Keys::load`].
    pub fn generate<C, R>(circuit: C, rng: &mut R) -> Result<Self, ProofError>
    where
        C: ConstraintSynthesizer<Fp254>,
        R: RngCore,
    {
        let params = Groth16::<Bn254>::generate_random_parameters_with_reduction(circuit, rng)
            .map_err(|e| {
                ProofError::CircuitProofError(format!("Groth16 key generation failed: {:?}", e))
            })?;

        Ok(Self::from_proving_key(params))
    }

    /// Development setup for the answer circuit.
    pub fn setup<R: RngCore>(rng: &mut R) -> Result<Self, ProofError> {
        Self::generate(AnswerCircuit::blank(), rng)
    }

    pub fn from_proving_key(proving_key: ProvingKey<Bn254>) -> Self {
        let verifying_key = proving_key.vk.clone();
        Self {
            proving_key,
            verifying_key,
        }
    }

    /// Load keys from precompiled artifacts.
    ///
    /// Fails if a verifying key is supplied and does not belong to the proving key.
    pub fn load(artifacts: &CircuitArtifacts) -> Result<Self, ProofError> {
        let pk_bytes = read_artifact(&artifacts.proving_key)?;
        let keys = Self::from_proving_key(Self::deserialize_proving_key(&pk_bytes)?);

        if let Some(vk_path) = &artifacts.verifying_key {
            let vk_bytes = read_artifact(vk_path)?;
            let supplied = Self::deserialize_verifying_key(&vk_bytes)?;

            let mut supplied_bytes = Vec::new();
            supplied
                .serialize_compressed(&mut supplied_bytes)
                .map_err(|e| ProofError::SerializationError(e.to_string()))?;

            if supplied_bytes != keys.serialize_verifying_key()? {
                return Err(ProofError::KeyMismatch(format!(
                    "verifying key {} does not match proving key {}",
                    vk_path.display(),
                    artifacts.proving_key.display()
                )));
            }
        }

        Ok(keys)
    }

    /// Write both keys as compressed artifacts.
    pub fn write(&self, proving_key: &Path, verifying_key: &Path) -> Result<(), ProofError> {
        write_artifact(proving_key, &self.serialize_proving_key()?)?;
        write_artifact(verifying_key, &self.serialize_verifying_key()?)
    }

    /// Compressed proving key bytes.
    pub fn serialize_proving_key(&self) -> Result<Vec<u8>, ProofError> {
        let mut bytes = Vec::new();
        self.proving_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))?;
        Ok(bytes)
    }

    pub fn deserialize_proving_key(bytes: &[u8]) -> Result<ProvingKey<Bn254>, ProofError> {
        ProvingKey::<Bn254>::deserialize_compressed(bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))
    }

    /// Compressed verifying key bytes, as embedded in the on-chain verifier.
    pub fn serialize_verifying_key(&self) -> Result<Vec<u8>, ProofError> {
        let mut bytes = Vec::new();
        self.verifying_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))?;
        Ok(bytes)
    }

    pub fn deserialize_verifying_key(bytes: &[u8]) -> Result<VerifyingKey<Bn254>, ProofError> {
        VerifyingKey::<Bn254>::deserialize_compressed(bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ProofError> {
    fs::read(path).map_err(|source| ProofError::Artifact {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), ProofError> {
    fs::write(path, bytes).map_err(|source| ProofError::Artifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Prove a fully assigned circuit. `rng` supplies the proof's blinding factors.
pub fn prove<C, R>(
    circuit: C,
    keys: &Groth16Keys,
    rng: &mut R,
) -> Result<Proof<Bn254>, ProofError>
where
    C: ConstraintSynthesizer<Fp254>,
    R: RngCore,
{
    Groth16::<Bn254>::create_random_proof_with_reduction(circuit, &keys.proving_key, rng)
        .map_err(|e| ProofError::CircuitProofError(format!("Groth16 proving failed: {:?}", e)))
}

/// `Ok(false)` means the proof does not verify for `public_inputs`.
pub fn verify(
    proof: &Proof<Bn254>,
    public_inputs: &[Fp254],
    vk: &VerifyingKey<Bn254>,
) -> Result<bool, ProofError> {
    let pvk = prepare_verifying_key(vk);
    verify_with_prepared_vk(proof, public_inputs, &pvk)
}

pub fn prepare_verifying_key(vk: &VerifyingKey<Bn254>) -> PreparedVerifyingKey<Bn254> {
    ark_groth16::prepare_verifying_key(vk)
}

pub fn verify_with_prepared_vk(
    proof: &Proof<Bn254>,
    public_inputs: &[Fp254],
    pvk: &PreparedVerifyingKey<Bn254>,
) -> Result<bool, ProofError> {
    Groth16::<Bn254>::verify_proof(pvk, proof, public_inputs)
        .map_err(|e| ProofError::CircuitProofError(format!("Groth16 verification failed: {:?}", e)))
}
