//! Field codec for circuit inputs.
//!
//! Every input to the answer circuit must live in the BN254 scalar field
//! `[0, r)`. Answers and commitment digests are read as big-endian integers and
//! reduced modulo `r`. A 32-byte public key does not fit reliably, so it is
//! split into two 128-bit limbs which are always strictly below `r`.

use std::fmt;

use ark_bn254::Fr as Fp254;
use ark_ff::{BigInteger, PrimeField};

/// BN254 scalar-field modulus `r`, big-endian.
///
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// An element of the proving system's scalar field.
///
/// Computed fresh for every submission attempt and never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(Fp254);

impl FieldElement {
    /// Interprets `bytes` as a big-endian integer and reduces it modulo `r`.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fp254::from_be_bytes_mod_order(bytes))
    }

    /// Canonical 32-byte big-endian representation.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        to_be32(&self.0)
    }

    /// Underlying arkworks scalar.
    pub fn inner(&self) -> Fp254 {
        self.0
    }
}

impl From<Fp254> for FieldElement {
    fn from(value: Fp254) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Fp254 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.into_bigint())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

/// Encodes the UTF-8 bytes of `answer` as a field element.
pub fn answer_to_field(answer: &str) -> FieldElement {
    FieldElement::from_be_bytes_mod_order(answer.as_bytes())
}

/// Encodes a 32-byte commitment digest as a field element.
pub fn digest_to_field(digest: &[u8; 32]) -> FieldElement {
    FieldElement::from_be_bytes_mod_order(digest)
}

/// Splits a 32-byte public key into `(lo, hi)` 128-bit limbs.
///
/// `hi` holds bytes `0..16` and `lo` holds bytes `16..32`, i.e. the high and
/// low halves of the key read as one big-endian integer.
pub fn pubkey_to_field_pair(pubkey: &[u8; 32]) -> (FieldElement, FieldElement) {
    let (hi, lo) = pubkey.split_at(16);
    (
        FieldElement::from_be_bytes_mod_order(lo),
        FieldElement::from_be_bytes_mod_order(hi),
    )
}

/// Big-endian bytes of a prime-field element, left-padded to 32 bytes.
pub(crate) fn to_be32<F: PrimeField>(value: &F) -> [u8; 32] {
    let bytes = value.into_bigint().to_bytes_be();
    debug_assert!(bytes.len() <= 32, "field element wider than 32 bytes");

    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_to_field_big_endian() {
        assert_eq!(answer_to_field(""), FieldElement::from(Fp254::from(0u64)));
        assert_eq!(answer_to_field("A"), FieldElement::from(Fp254::from(65u64)));
        // "AB" = 0x4142
        assert_eq!(answer_to_field("AB"), FieldElement::from(Fp254::from(0x4142u64)));
    }

    #[test]
    fn test_answer_to_field_reduces_long_answers() {
        let long = "the quick brown fox jumps over the lazy dog, twice over";
        let element = answer_to_field(long);
        assert!(element.to_be_bytes() < SCALAR_MODULUS);
    }

    #[test]
    fn test_digest_equal_to_modulus_reduces_to_zero() {
        assert_eq!(digest_to_field(&SCALAR_MODULUS), FieldElement::default());
    }

    #[test]
    fn test_digest_to_field_is_reduced() {
        let digest = [0xffu8; 32];
        let element = digest_to_field(&digest);
        assert!(element.to_be_bytes() < SCALAR_MODULUS);
        assert_ne!(element, FieldElement::default());
    }

    #[test]
    fn test_pubkey_pair_limbs() {
        let mut pubkey = [0u8; 32];
        for (i, byte) in pubkey.iter_mut().enumerate() {
            *byte = i as u8 + 1;
        }

        let (lo, hi) = pubkey_to_field_pair(&pubkey);
        let expected_hi = u128::from_be_bytes(pubkey[..16].try_into().unwrap());
        let expected_lo = u128::from_be_bytes(pubkey[16..].try_into().unwrap());

        assert_eq!(hi, FieldElement::from(Fp254::from(expected_hi)));
        assert_eq!(lo, FieldElement::from(Fp254::from(expected_lo)));
    }

    #[test]
    fn test_pubkey_pair_never_reduced() {
        let (lo, hi) = pubkey_to_field_pair(&[0xffu8; 32]);
        let max_limb = FieldElement::from(Fp254::from(u128::MAX));
        assert_eq!(lo, max_limb);
        assert_eq!(hi, max_limb);
    }

    #[test]
    fn test_pubkey_pair_injective_across_boundary() {
        let mut left = [0u8; 32];
        let mut right = [0u8; 32];
        left[15] = 1; // last byte of the high limb
        right[16] = 1; // first byte of the low limb

        assert_ne!(pubkey_to_field_pair(&left), pubkey_to_field_pair(&right));
        assert_eq!(pubkey_to_field_pair(&left), pubkey_to_field_pair(&left));
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(answer_to_field("A").to_string(), "65");
    }
}
