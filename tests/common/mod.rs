//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use httpfromtcp::{HandlerError, Request, Server, ServerConfig, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Handler used by most tests: routes on the target, echoes POST bodies.
pub fn routing_handler(body: &mut Vec<u8>, request: &Request) -> Result<(), HandlerError> {
    match request.request_line.target.as_str() {
        "/yourproblem" => Err(HandlerError::new(StatusCode::BAD_REQUEST, "Your problem is not my problem\n")),
        "/myproblem" => Err(HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, "Woopsie, my bad\n")),
        "/echo" => {
            body.extend_from_slice(&request.body);
            Ok(())
        }
        _ => {
            body.extend_from_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}

/// Start a server on an ephemeral port.
pub async fn start_server() -> Server {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    Server::serve(&config, routing_handler).await.unwrap()
}

/// Send `raw` in one write and read until the server closes.
pub async fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    read_all(stream).await
}

/// Send `raw`, then half-close so the server sees end-of-stream.
#[allow(dead_code)]
pub async fn send_and_shutdown(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    stream.shutdown().await.unwrap();
    read_all(stream).await
}

/// Send `raw` a few bytes at a time with a pause between writes.
#[allow(dead_code)]
pub async fn send_fragmented(addr: SocketAddr, raw: &[u8], piece: usize) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.set_nodelay(true).unwrap();
    for chunk in raw.chunks(piece) {
        stream.write_all(chunk).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    read_all(stream).await
}

async fn read_all(mut stream: TcpStream) -> String {
    let mut out = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut out))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8(out).unwrap()
}

/// Split a response into head and body at the first blank line.
#[allow(dead_code)]
pub fn split_response(response: &str) -> (&str, &str) {
    response
        .split_once("\r\n\r\n")
        .expect("response has no header terminator")
}
