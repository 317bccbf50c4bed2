//! Poseidon answer commitments over BN254.
//!
//! The quest program stores `Poseidon(answer)` as the round's 32-byte answer
//! commitment. The native hash here must match the in-circuit sponge in
//! [`super::answer`]; both use the same cached config.
//!
//! # Security Parameters
//!
//! - Field: BN254 scalar field (254-bit prime)
//! - Full rounds: 8
//! - Partial rounds: 57
//! - Rate 2, capacity 1, alpha 5

use std::sync::OnceLock;

use ark_bn254::Fr as Fp254;
use ark_crypto_primitives::sponge::{
    CryptographicSponge,
    poseidon::{PoseidonConfig, PoseidonSponge, find_poseidon_ark_and_mds},
};

use crate::field::{FieldElement, answer_to_field};

/// Cached Poseidon config (parameter search is expensive, run it once).
static POSEIDON_CONFIG: OnceLock<PoseidonConfig<Fp254>> = OnceLock::new();

/// Get cached Poseidon config (8/57 rounds, 128-bit security).
pub fn get_poseidon_config() -> &'static PoseidonConfig<Fp254> {
    POSEIDON_CONFIG.get_or_init(|| {
        let (ark, mds) = find_poseidon_ark_and_mds::<Fp254>(254, 2, 8, 57, 0);
        PoseidonConfig::new(8, 57, 5, mds, ark, 2, 1)
    })
}

/// Poseidon hash of a single field element.
pub fn hash_one(input: FieldElement) -> FieldElement {
    let mut sponge = PoseidonSponge::<Fp254>::new(get_poseidon_config());
    let inputs = [input.inner()];
    sponge.absorb(&inputs.as_slice());

    // A single-element squeeze from a freshly absorbed sponge always yields one value.
    let out: Vec<Fp254> = sponge.squeeze_field_elements(1);
    FieldElement::from(out[0])
}

/// Commitment digest the round stores for `answer`.
///
/// Feeding this digest back through [`crate::field::digest_to_field`] yields
/// exactly the public input the circuit checks against.
pub fn answer_commitment(answer: &str) -> [u8; 32] {
    hash_one(answer_to_field(answer)).to_be_bytes()
}
