//! Proof transcoding for the quest program and the relay.
//!
//! On-chain layout (256 bytes, every coordinate a 32-byte big-endian integer):
//!
//! ```text
//! [  0.. 64)  A.x | -A.y            (A negated over the base field)
//! [ 64..192)  B.x.c1 | B.x.c0 | B.y.c1 | B.y.c0
//! [192..256)  C.x | C.y
//! ```
//!
//! The program's pairing check consumes `-A`, and expects each `Fq2`
//! coordinate with its components swapped relative to the prover's native
//! `(c0, c1)` order. The relay takes the same three segments as lowercase hex
//! without a `0x` prefix.

use ark_bn254::Fq;
use serde::{Deserialize, Serialize};

use crate::bundle::{G1Point, G2Point, ProofBundle};
use crate::field::to_be32;

/// Size of the on-chain proof in bytes.
pub const PROOF_LEN: usize = 256;

const A_RANGE: std::ops::Range<usize> = 0..64;
const B_RANGE: std::ops::Range<usize> = 64..192;
const C_RANGE: std::ops::Range<usize> = 192..256;

/// Proof bytes in the layout the quest program verifies.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OnChainEncoding([u8; PROOF_LEN]);

impl OnChainEncoding {
    pub fn as_bytes(&self) -> &[u8; PROOF_LEN] {
        &self.0
    }

    pub fn proof_a(&self) -> &[u8] {
        &self.0[A_RANGE]
    }

    pub fn proof_b(&self) -> &[u8] {
        &self.0[B_RANGE]
    }

    pub fn proof_c(&self) -> &[u8] {
        &self.0[C_RANGE]
    }
}

impl From<[u8; PROOF_LEN]> for OnChainEncoding {
    fn from(bytes: [u8; PROOF_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for OnChainEncoding {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for OnChainEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OnChainEncoding({})", hex::encode(self.0))
    }
}

/// Proof segments as hex text for the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexEncoding {
    /// 128 hex chars
    pub proof_a: String,
    /// 256 hex chars
    pub proof_b: String,
    /// 128 hex chars
    pub proof_c: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("{segment} is not valid hex: {reason}")]
    InvalidHex {
        segment: &'static str,
        reason: String,
    },

    #[error("{segment} must be {expected} bytes, got {actual}")]
    InvalidLength {
        segment: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl HexEncoding {
    /// Parses the three segments back into on-chain bytes.
    pub fn decode(&self) -> Result<OnChainEncoding, TranscodeError> {
        let mut out = [0u8; PROOF_LEN];
        decode_segment("proofA", &self.proof_a, &mut out[A_RANGE])?;
        decode_segment("proofB", &self.proof_b, &mut out[B_RANGE])?;
        decode_segment("proofC", &self.proof_c, &mut out[C_RANGE])?;
        Ok(OnChainEncoding(out))
    }
}

fn decode_segment(
    segment: &'static str,
    text: &str,
    dest: &mut [u8],
) -> Result<(), TranscodeError> {
    let bytes = hex::decode(text).map_err(|e| TranscodeError::InvalidHex {
        segment,
        reason: e.to_string(),
    })?;
    if bytes.len() != dest.len() {
        return Err(TranscodeError::InvalidLength {
            segment,
            expected: dest.len(),
            actual: bytes.len(),
        });
    }
    dest.copy_from_slice(&bytes);
    Ok(())
}

/// Both encodings of one proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedProof {
    pub on_chain: OnChainEncoding,
    pub hex: HexEncoding,
}

/// Produces both encodings from a bundle.
pub fn transcode(bundle: &ProofBundle) -> TranscodedProof {
    let on_chain = to_on_chain_encoding(bundle);
    let hex = to_hex_encoding(&on_chain);
    TranscodedProof { on_chain, hex }
}

/// Lays the bundle out in the program's 256-byte format.
pub fn to_on_chain_encoding(bundle: &ProofBundle) -> OnChainEncoding {
    let mut out = [0u8; PROOF_LEN];
    write_g1(&mut out[A_RANGE], &negate_y(&bundle.a));
    write_g2(&mut out[B_RANGE], &bundle.b);
    write_g1(&mut out[C_RANGE], &bundle.c);
    OnChainEncoding(out)
}

/// Hex-encodes the three segments of an on-chain proof.
pub fn to_hex_encoding(on_chain: &OnChainEncoding) -> HexEncoding {
    HexEncoding {
        proof_a: hex::encode(on_chain.proof_a()),
        proof_b: hex::encode(on_chain.proof_b()),
        proof_c: hex::encode(on_chain.proof_c()),
    }
}

// Base-field negation; the identity's zero y stays zero.
fn negate_y(point: &G1Point) -> G1Point {
    G1Point {
        x: point.x,
        y: -point.y,
    }
}

fn write_g1(dest: &mut [u8], point: &G1Point) {
    dest[..32].copy_from_slice(&to_be32(&point.x));
    dest[32..64].copy_from_slice(&to_be32(&point.y));
}

fn write_g2(dest: &mut [u8], point: &G2Point) {
    dest[..32].copy_from_slice(&to_be32(&point.x.c1));
    dest[32..64].copy_from_slice(&to_be32(&point.x.c0));
    dest[64..96].copy_from_slice(&to_be32(&point.y.c1));
    dest[96..128].copy_from_slice(&to_be32(&point.y.c0));
}
