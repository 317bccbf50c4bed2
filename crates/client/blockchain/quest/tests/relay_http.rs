//! Relay client against a one-shot local HTTP server.

use client_blockchain_core::{Address, RelayError, RelayTransport, TransactionId};
use client_blockchain_quest::{QuestConfig, RelayClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use zk::HexEncoding;

/// Serves one canned response and returns the raw request it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8(buf).unwrap()
}

fn client(url: &str) -> RelayClient {
    let config = QuestConfig::new(
        Address::new([1; 32]),
        Address::new([2; 32]),
        Address::new([3; 32]),
    )
    .with_relay_url(url);
    RelayClient::from_config(&config).unwrap()
}

fn proof() -> HexEncoding {
    HexEncoding {
        proof_a: "aa".repeat(64),
        proof_b: "bb".repeat(128),
        proof_c: "cc".repeat(64),
    }
}

#[tokio::test]
async fn relay_success_returns_tx_hash() {
    let (url, server) = serve_once("200 OK", r#"{"txHash":"relay-sig-1"}"#).await;
    let user = Address::new([0; 32]);

    let id = client(&url).submit_answer(&user, &proof()).await.unwrap();
    assert_eq!(id, TransactionId::from("relay-sig-1"));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /submit-answer "));

    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["user"], "11111111111111111111111111111111");
    assert_eq!(json["proofA"], proof().proof_a);
    assert_eq!(json["proofB"], proof().proof_b);
    assert_eq!(json["proofC"], proof().proof_c);
}

#[tokio::test]
async fn relay_rejection_surfaces_error_field() {
    let (url, server) = serve_once("400 Bad Request", r#"{"error":"pool exhausted"}"#).await;

    let err = client(&url)
        .submit_answer(&Address::new([9; 32]), &proof())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RelayError::Rejected {
            status: 400,
            message: "pool exhausted".to_string()
        }
    );
    server.await.unwrap();
}

#[tokio::test]
async fn relay_rejection_without_body_uses_status() {
    let (url, server) = serve_once("503 Service Unavailable", "").await;

    let err = client(&url)
        .submit_answer(&Address::new([9; 32]), &proof())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503");
    server.await.unwrap();
}

#[tokio::test]
async fn relay_unreachable_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&url)
        .submit_answer(&Address::new([9; 32]), &proof())
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::NetworkError(_)));
}
