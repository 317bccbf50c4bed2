//! Relay request and response bodies.
//!
//! Response fields are optional with `#[serde(default)]` so a relay that adds
//! or drops fields does not break parsing; only the presence of `txHash`
//! decides success.

use client_blockchain_core::{Address, RelayError, TransactionId};
use serde::{Deserialize, Serialize};
use zk::HexEncoding;

/// Body of `POST /submit-answer`.
///
/// `user` goes on the wire in base58, the form the relay keys users by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub user: Address,
    pub proof_a: String,
    pub proof_b: String,
    pub proof_c: String,
}

impl SubmitAnswerRequest {
    pub fn new(user: &Address, proof: &HexEncoding) -> Self {
        Self {
            user: *user,
            proof_a: proof.proof_a.clone(),
            proof_b: proof.proof_b.clone(),
            proof_c: proof.proof_c.clone(),
        }
    }
}

/// Response from the relay, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    /// Transaction signature. Older relays name it `signature`, `txId`
    /// or `transactionId`.
    #[serde(
        default,
        alias = "signature",
        alias = "txId",
        alias = "transactionId"
    )]
    pub tx_hash: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitAnswerResponse {
    /// Interpret an HTTP status and raw body.
    ///
    /// Non-2xx fails with the body's `error` field, falling back to
    /// `HTTP <status>` when the body is empty, not JSON, or has no message.
    pub fn interpret(status: u16, body: &str) -> Result<TransactionId, RelayError> {
        let parsed = serde_json::from_str::<SubmitAnswerResponse>(body);

        if !(200..300).contains(&status) {
            let message = parsed
                .ok()
                .and_then(|response| response.error)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(RelayError::Rejected { status, message });
        }

        let response = parsed.map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
        match response.tx_hash {
            Some(tx_hash) if !tx_hash.is_empty() => Ok(TransactionId::new(tx_hash)),
            _ => Err(RelayError::InvalidResponse(
                response.error.unwrap_or_else(|| "missing txHash".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_names() {
        let proof = HexEncoding {
            proof_a: "aa".to_string(),
            proof_b: "bb".to_string(),
            proof_c: "cc".to_string(),
        };
        let user: Address = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA".parse().unwrap();
        let request = SubmitAnswerRequest::new(&user, &proof);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["user"], "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
        assert_eq!(value["proofA"], "aa");
        assert_eq!(value["proofB"], "bb");
        assert_eq!(value["proofC"], "cc");
    }

    #[test]
    fn test_interpret_success() {
        let id = SubmitAnswerResponse::interpret(200, r#"{"txHash":"5abc"}"#).unwrap();
        assert_eq!(id, TransactionId::from("5abc"));
    }

    #[test]
    fn test_interpret_legacy_signature_names() {
        for body in [
            r#"{"signature":"5xyz"}"#,
            r#"{"txId":"5xyz"}"#,
            r#"{"transactionId":"5xyz"}"#,
        ] {
            let id = SubmitAnswerResponse::interpret(201, body).unwrap();
            assert_eq!(id, TransactionId::from("5xyz"));
        }
    }

    #[test]
    fn test_interpret_error_message() {
        let err = SubmitAnswerResponse::interpret(400, r#"{"error":"pool exhausted"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            RelayError::Rejected {
                status: 400,
                message: "pool exhausted".to_string()
            }
        );
        assert_eq!(err.to_string(), "pool exhausted");
    }

    #[test]
    fn test_interpret_error_without_message() {
        for body in ["", "<html>bad gateway</html>", "{}", r#"{"error":""}"#] {
            let err = SubmitAnswerResponse::interpret(502, body).unwrap_err();
            assert_eq!(err.to_string(), "HTTP 502");
        }
    }

    #[test]
    fn test_interpret_success_without_tx_hash() {
        assert!(matches!(
            SubmitAnswerResponse::interpret(200, "{}"),
            Err(RelayError::InvalidResponse(_))
        ));
        assert!(matches!(
            SubmitAnswerResponse::interpret(200, "not json"),
            Err(RelayError::InvalidResponse(_))
        ));
    }
}
