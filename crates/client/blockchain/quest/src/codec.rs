//! Anchor account and instruction framing.
//!
//! Program accounts are an 8-byte discriminator followed by the Borsh
//! serialization of the account struct. Bytes past the struct are the
//! account's unused space and are ignored.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};

/// Length of account and instruction discriminators.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Errors raised while framing program accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{account} account is {len} bytes, shorter than its discriminator")]
    TooShort { account: &'static str, len: usize },

    #[error("account discriminator does not match {account}")]
    DiscriminatorMismatch { account: &'static str },

    #[error("malformed {account} account: {reason}")]
    Malformed {
        account: &'static str,
        reason: String,
    },

    #[error("failed to encode {account} account: {reason}")]
    Encode {
        account: &'static str,
        reason: String,
    },
}

/// `sha256("account:<name>")[..8]`
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    prefix8(&format!("account:{}", name))
}

/// `sha256("global:<name>")[..8]`
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    prefix8(&format!("global:{}", name))
}

fn prefix8(preimage: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(preimage.as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Checks the discriminator of account `name` and deserializes the body.
pub fn decode_account<T: BorshDeserialize>(
    name: &'static str,
    data: &[u8],
) -> Result<T, CodecError> {
    let Some((discriminator, mut body)) = data.split_first_chunk::<DISCRIMINATOR_LEN>() else {
        return Err(CodecError::TooShort {
            account: name,
            len: data.len(),
        });
    };
    if *discriminator != account_discriminator(name) {
        return Err(CodecError::DiscriminatorMismatch { account: name });
    }

    T::deserialize(&mut body).map_err(|e| CodecError::Malformed {
        account: name,
        reason: e.to_string(),
    })
}

/// Discriminator of account `name` followed by the Borsh body of `value`.
pub fn encode_account<T: BorshSerialize>(
    name: &'static str,
    value: &T,
) -> Result<Vec<u8>, CodecError> {
    let mut data = account_discriminator(name).to_vec();
    value
        .serialize(&mut data)
        .map_err(|e| CodecError::Encode {
            account: name,
            reason: e.to_string(),
        })?;
    Ok(data)
}
