//! Proof bundle produced by a proving engine.
//!
//! The bundle is a fixed, typed view of a Groth16 proof: three curve points
//! with base-field coordinates. Engines convert their native proof objects
//! into this shape so nothing engine-specific leaks into the transcoder or the
//! submission pipeline.

use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_groth16::Proof;

/// Affine G1 point `(x, y)` over the BN254 base field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct G1Point {
    pub x: Fq,
    pub y: Fq,
}

/// Affine G2 point over `Fq2`.
///
/// Each coordinate keeps the prover's native component order `(c0, c1)`.
/// Reordering for the chain happens only in the transcoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct G2Point {
    pub x: Fq2,
    pub y: Fq2,
}

/// Groth16 proof points `(A ∈ G1, B ∈ G2, C ∈ G1)`.
///
/// Lives only for the duration of one submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProofBundle {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

impl From<&G1Affine> for G1Point {
    fn from(point: &G1Affine) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<&G2Affine> for G2Point {
    fn from(point: &G2Affine) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<&Proof<Bn254>> for ProofBundle {
    fn from(proof: &Proof<Bn254>) -> Self {
        Self {
            a: G1Point::from(&proof.a),
            b: G2Point::from(&proof.b),
            c: G1Point::from(&proof.c),
        }
    }
}

impl ProofBundle {
    /// Rebuilds the arkworks proof, e.g. for local verification.
    pub fn to_ark(&self) -> Proof<Bn254> {
        Proof {
            a: G1Affine::new_unchecked(self.a.x, self.a.y),
            b: G2Affine::new_unchecked(self.b.x, self.b.y),
            c: G1Affine::new_unchecked(self.c.x, self.c.y),
        }
    }
}
