//! Full pipeline with the Groth16 engine: artifacts on disk, a real proof,
//! relay dispatch, confirmation and reward extraction.

mod common;

use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ff::PrimeField;
use ark_groth16::Proof;
use client_blockchain_core::MockRelay;
use common::*;
use runtime::{ErrorKind, SubmissionPath, SubmissionRouter};
use zk::circuit::groth16;
use zk::{AnswerCircuit, CircuitArtifacts, Groth16Keys, ProofGenerator, ProofWitness};

fn word(bytes: &[u8], index: usize) -> Fq {
    Fq::from_be_bytes_mod_order(&bytes[index * 32..(index + 1) * 32])
}

// Reverse of the on-chain layout: un-negate A.y and restore (c0, c1) order.
fn read_on_chain(bytes: &[u8]) -> Proof<Bn254> {
    Proof {
        a: G1Affine::new_unchecked(word(bytes, 0), -word(bytes, 1)),
        b: G2Affine::new_unchecked(
            Fq2::new(word(bytes, 3), word(bytes, 2)),
            Fq2::new(word(bytes, 5), word(bytes, 4)),
        ),
        c: G1Affine::new_unchecked(word(bytes, 6), word(bytes, 7)),
    }
}

fn router_with_real_prover(harness: &Harness, artifacts: &CircuitArtifacts) -> SubmissionRouter {
    SubmissionRouter::builder()
        .config(Harness::config(SubmissionPath::Relay))
        .transport(harness.chain.clone())
        .contract(contract())
        .generator(ProofGenerator::from_artifacts(artifacts).unwrap())
        .relay(harness.relay.clone())
        .clock(harness.clock.clone())
        .identity(user())
        .build()
        .unwrap()
}

#[tokio::test]
async fn relay_receives_a_verifying_proof() {
    let dir = tempfile::tempdir().unwrap();
    let keys = Groth16Keys::setup(&mut ark_std::test_rng()).unwrap();
    let (pk, vk) = (dir.path().join("answer.pk"), dir.path().join("answer.vk"));
    keys.write(&pk, &vk).unwrap();
    let artifacts = CircuitArtifacts::new(pk).with_verifying_key(vk);

    let harness = Harness::new(MockRelay::accepting("relay-sig"));
    harness.confirm("relay-sig");

    let outcome = router_with_real_prover(&harness, &artifacts)
        .submit(ANSWER)
        .await
        .unwrap();
    assert_eq!(outcome.reward.amount, 800);

    let requests = harness.relay.requests();
    assert_eq!(requests.len(), 1);
    let on_chain = requests[0].1.decode().unwrap();

    let commitment = quest_round(NOW).answer_commitment;
    let witness = ProofWitness::new(ANSWER, &commitment, &user().to_bytes());
    let inputs = AnswerCircuit::new(&witness).public_inputs().unwrap();
    let proof = read_on_chain(on_chain.as_bytes());
    assert!(groth16::verify(&proof, &inputs, &keys.verifying_key).unwrap());
}

#[tokio::test]
async fn real_prover_rejects_wrong_answer() {
    let dir = tempfile::tempdir().unwrap();
    let keys = Groth16Keys::setup(&mut ark_std::test_rng()).unwrap();
    let (pk, vk) = (dir.path().join("answer.pk"), dir.path().join("answer.vk"));
    keys.write(&pk, &vk).unwrap();

    let harness = Harness::new(MockRelay::accepting("relay-sig"));
    let err = router_with_real_prover(&harness, &CircuitArtifacts::new(pk))
        .submit("lyon")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WrongAnswer);
    assert!(harness.relay.requests().is_empty());
}

#[tokio::test]
async fn missing_artifacts_are_infrastructure_failures() {
    let dir = tempfile::tempdir().unwrap();
    let missing = CircuitArtifacts::new(dir.path().join("absent.pk"));

    let err = ProofGenerator::from_artifacts(&missing).err().unwrap();
    let err = runtime::SubmissionError::from(err);
    assert_eq!(err.kind(), ErrorKind::ProofInfrastructure);
    assert!(!err.kind().is_retryable_with_new_answer());
}
