//! HTTP client tests against a local one-shot listener — no fakes, the
//! real request/response path through `HttpGateway`.
//!
//! Run with: `cargo test --features gateway --test gateway_tests`

#![cfg(feature = "gateway")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use notafiscal::core::Error;
use notafiscal::gateway::{Environment, FiscalGateway, GatewayConfig, GatewayStatus, HttpGateway};

/// Serve exactly one HTTP response on an ephemeral port; returns the
/// base URL to point the client at.
fn serve_once(status_line: &str, content_type: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

fn gateway_at(base_url: String) -> HttpGateway {
    HttpGateway::new(GatewayConfig::new(Environment::Homologation, "tok").with_base_url(base_url))
        .unwrap()
}

#[tokio::test]
async fn plain_text_401_surfaces_as_authentication_error() {
    // Credential failures arrive as plain text, not JSON; they must be
    // classified from the HTTP status alone, before any body parsing.
    let base = serve_once("401 Unauthorized", "text/plain", "Token de acesso invalido");
    let gateway = gateway_at(base);

    let err = gateway.poll_status("nfe-1-55").await.unwrap_err();

    assert!(matches!(err, Error::Authentication(_)), "got {err:?}");
    assert!(err.message().contains("Token de acesso invalido"));
}

#[tokio::test]
async fn forbidden_is_also_an_authentication_error() {
    let base = serve_once("403 Forbidden", "text/plain", "acesso negado");
    let gateway = gateway_at(base);

    let err = gateway.poll_status("nfe-1-55").await.unwrap_err();

    assert!(matches!(err, Error::Authentication(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_transport_not_authentication() {
    let base = serve_once("500 Internal Server Error", "text/plain", "erro interno");
    let gateway = gateway_at(base);

    let err = gateway.poll_status("nfe-1-55").await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn json_receipt_round_trips_through_the_wire() {
    let base = serve_once(
        "200 OK",
        "application/json",
        r#"{"status":"autorizado","chave_nfe":"NFe123","protocolo":"135"}"#,
    );
    let gateway = gateway_at(base);

    let receipt = gateway.poll_status("nfe-1-55").await.unwrap();

    assert_eq!(receipt.status, GatewayStatus::Authorized);
    assert_eq!(receipt.access_key.as_deref(), Some("NFe123"));
}
