//! Quest program accounts and instructions.
//!
//! ## Program Reference
//!
//! ```text
//! account QuestRound {
//!     round: u64,
//!     question_id: u64,
//!     question_text: string,
//!     answer_commitment: [u8; 32],
//!     deadline: i64,
//!     reward_pool_total: u64,
//!     reward_slots_total: u32,
//!     reward_slots_filled: u32,
//!     active: bool,
//! }
//!
//! account AnswerRecord {       // one per user, seeds ["answer", user]
//!     round: u64,
//!     rewarded: bool,
//! }
//!
//! instruction submit_answer(proof: [u8; 256])
//!     accounts: round (w), answer_record (w), user (s, w), vault (w), system_program
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use client_blockchain_core::{AccountMeta, Address, Instruction};
use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use zk::OnChainEncoding;

use crate::codec::{CodecError, decode_account, encode_account, instruction_discriminator};
use crate::config::QuestConfig;

/// System program id (all zeros).
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; 32]);

/// First seed of every answer-record PDA.
pub const ANSWER_RECORD_SEED: &[u8] = b"answer";

// ============================================================================
// Accounts (1:1 mapping with program structs)
// ============================================================================

/// On-chain quiz round.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct QuestRound {
    /// Round counter, bumped on every new question
    pub round: u64,
    pub question_id: u64,
    pub question_text: String,
    /// Poseidon digest of the correct answer
    pub answer_commitment: [u8; 32],
    /// Unix seconds
    pub deadline: i64,
    pub reward_pool_total: u64,
    pub reward_slots_total: u32,
    pub reward_slots_filled: u32,
    pub active: bool,
}

impl QuestRound {
    pub const ACCOUNT_NAME: &'static str = "QuestRound";

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        decode_account(Self::ACCOUNT_NAME, data)
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_account(Self::ACCOUNT_NAME, self)
    }

    /// Unfilled reward slots, saturating at zero.
    pub fn remaining_slots(&self) -> u32 {
        self.reward_slots_total
            .saturating_sub(self.reward_slots_filled)
    }

    /// The deadline is exclusive: at `now == deadline` the round is closed.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.deadline
    }
}

/// Per-user answer record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct AnswerRecord {
    /// Round of the user's latest accepted submission
    pub round: u64,
    pub rewarded: bool,
}

impl AnswerRecord {
    pub const ACCOUNT_NAME: &'static str = "AnswerRecord";

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        decode_account(Self::ACCOUNT_NAME, data)
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_account(Self::ACCOUNT_NAME, self)
    }
}

// ============================================================================
// QuestContract - Contract metadata and instruction builders
// ============================================================================

/// Quest program metadata and instruction builders.
///
/// Holds only addresses. Chain access, signing and submission are passed in
/// by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestContract {
    pub program_id: Address,
    pub round_account: Address,
    pub vault_account: Address,
}

impl QuestContract {
    pub fn new(program_id: Address, round_account: Address, vault_account: Address) -> Self {
        Self {
            program_id,
            round_account,
            vault_account,
        }
    }

    pub fn from_config(config: &QuestConfig) -> Self {
        Self::new(config.program_id, config.round_account, config.vault_account)
    }

    /// Address of `user`'s answer record: the program-derived address for
    /// seeds `["answer", user]` at the canonical bump.
    pub fn answer_record_address(&self, user: &Address) -> Address {
        self.answer_record_pda(user).0
    }

    /// Answer-record PDA together with its bump seed.
    pub fn answer_record_pda(&self, user: &Address) -> (Address, u8) {
        let program_id = Pubkey::new_from_array(self.program_id.to_bytes());
        let (pda, bump) =
            Pubkey::find_program_address(&[ANSWER_RECORD_SEED, user.as_slice()], &program_id);
        (Address::new(pda.to_bytes()), bump)
    }

    /// `submit_answer` instruction: discriminator followed by the 256 proof bytes.
    pub fn submit_answer(&self, user: &Address, proof: &OnChainEncoding) -> Instruction {
        let mut data = Vec::with_capacity(8 + zk::PROOF_LEN);
        data.extend_from_slice(&instruction_discriminator("submit_answer"));
        data.extend_from_slice(proof.as_bytes());

        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::writable(self.round_account, false),
                AccountMeta::writable(self.answer_record_address(user), false),
                AccountMeta::writable(*user, true),
                AccountMeta::writable(self.vault_account, false),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::account_discriminator;

    fn round() -> QuestRound {
        QuestRound {
            round: 3,
            question_id: 17,
            question_text: "Capital of France?".to_string(),
            answer_commitment: [9u8; 32],
            deadline: 1_700_000_000,
            reward_pool_total: 5_000,
            reward_slots_total: 10,
            reward_slots_filled: 4,
            active: true,
        }
    }

    fn contract() -> QuestContract {
        QuestContract::new(
            Address::new([1; 32]),
            Address::new([2; 32]),
            Address::new([3; 32]),
        )
    }

    #[test]
    fn test_round_layout() {
        let bytes = round().encode().unwrap();

        // discriminator + 8 + 8 + (4 + 18) + 32 + 8 + 8 + 4 + 4 + 1
        assert_eq!(bytes.len(), 8 + 8 + 8 + 22 + 32 + 8 + 8 + 4 + 4 + 1);
        assert_eq!(&bytes[..8], &account_discriminator("QuestRound"));
        assert_eq!(&bytes[8..16], &3u64.to_le_bytes());
        assert_eq!(&bytes[24..28], &18u32.to_le_bytes());
        assert_eq!(&bytes[46..78], &[9u8; 32]);
        assert_eq!(bytes[bytes.len() - 1], 1);
        assert_eq!(QuestRound::decode(&bytes).unwrap(), round());
    }

    #[test]
    fn test_round_decode_ignores_trailing_space() {
        let mut bytes = round().encode().unwrap();
        bytes.extend_from_slice(&[0u8; 64]);
        assert_eq!(QuestRound::decode(&bytes).unwrap(), round());
    }

    #[test]
    fn test_round_decode_truncated() {
        let bytes = round().encode().unwrap();
        let err = QuestRound::decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Malformed {
                account: "QuestRound",
                ..
            }
        ));
    }

    #[test]
    fn test_round_decode_rejects_answer_record() {
        let bytes = AnswerRecord {
            round: 1,
            rewarded: false,
        }
        .encode()
        .unwrap();
        assert_eq!(
            QuestRound::decode(&bytes).unwrap_err(),
            CodecError::DiscriminatorMismatch {
                account: "QuestRound"
            }
        );
    }

    #[test]
    fn test_remaining_slots_saturates() {
        let mut r = round();
        assert_eq!(r.remaining_slots(), 6);
        r.reward_slots_filled = 12;
        assert_eq!(r.remaining_slots(), 0);
    }

    #[test]
    fn test_expiry_boundary() {
        let r = round();
        assert!(!r.is_expired(r.deadline - 1));
        assert!(r.is_expired(r.deadline));
        assert!(r.is_expired(r.deadline + 1));
    }

    #[test]
    fn test_answer_record_layout() {
        let record = AnswerRecord {
            round: 42,
            rewarded: true,
        };
        let bytes = record.encode().unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(AnswerRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn test_answer_record_address_per_user() {
        let contract = contract();
        let alice = Address::new([10; 32]);
        let bob = Address::new([11; 32]);

        assert_eq!(
            contract.answer_record_address(&alice),
            contract.answer_record_address(&alice)
        );
        assert_ne!(
            contract.answer_record_address(&alice),
            contract.answer_record_address(&bob)
        );
    }

    #[test]
    fn test_answer_record_address_is_program_derived() {
        let contract = contract();
        let user = Address::new([10; 32]);

        let (address, bump) = contract.answer_record_pda(&user);
        assert_eq!(bump, 255);
        assert!(hex::encode(address.as_bytes()).starts_with("5aad28ca"));

        let program_id = Pubkey::new_from_array(contract.program_id.to_bytes());
        let recreated = Pubkey::create_program_address(
            &[ANSWER_RECORD_SEED, user.as_slice(), &[bump]],
            &program_id,
        )
        .unwrap();
        assert_eq!(recreated.to_bytes(), address.to_bytes());
        assert!(!recreated.is_on_curve());
    }

    #[test]
    fn test_submit_answer_instruction() {
        let contract = contract();
        let user = Address::new([10; 32]);
        let proof = OnChainEncoding::from([7u8; 256]);

        let ix = contract.submit_answer(&user, &proof);

        assert_eq!(ix.program_id, contract.program_id);
        assert_eq!(ix.data.len(), 264);
        assert_eq!(&ix.data[..8], &instruction_discriminator("submit_answer"));
        assert_eq!(&ix.data[8..], proof.as_bytes());

        let signers: Vec<_> = ix.accounts.iter().filter(|a| a.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].address, user);
        assert_eq!(ix.accounts[1].address, contract.answer_record_address(&user));
        assert_eq!(ix.accounts[4].address, SYSTEM_PROGRAM_ID);
        assert!(!ix.accounts[4].is_writable);
    }
}
