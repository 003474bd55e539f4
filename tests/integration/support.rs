//! Shared fixtures: recording clients and a one-shot HTTP server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use webtics::{EndpointConfig, MemoryTransport, TicsClient};

/// Client on `localhost` + `/t/` recording into a memory transport, debug mode off.
pub fn recording_client() -> (TicsClient, Arc<MemoryTransport>) {
    recording_client_with(|builder| builder)
}

pub fn recording_client_with(
    customize: impl FnOnce(webtics::TicsClientBuilder) -> webtics::TicsClientBuilder,
) -> (TicsClient, Arc<MemoryTransport>) {
    let transport = Arc::new(MemoryTransport::new());
    let builder = TicsClient::builder()
        .transport(transport.clone())
        .endpoint(EndpointConfig::new("localhost", "/t/"))
        .debug_mode(false);
    let client = customize(builder).build().unwrap();
    (client, transport)
}

/// One canned HTTP response.
#[derive(Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: "200 OK",
            body: body.into(),
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Serve `replies` on consecutive connections, returning the address and a handle that yields
/// each request line (`GET /path?query HTTP/1.1`).
pub fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            seen.push(request_line.trim_end().to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                reply.status,
                reply.body.len(),
                reply.body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        seen
    });
    (addr, handle)
}

/// Serve one response that advertises `content_length` bytes and then sends `chunk` bytes every
/// `pause` until the client hangs up or the advertised length is reached.
pub fn serve_trickle(content_length: usize, chunk: usize, pause: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                break;
            }
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n",
            content_length
        );
        if stream.write_all(head.as_bytes()).is_err() {
            return;
        }
        let block = vec![b'x'; chunk];
        let mut sent = 0;
        while sent < content_length {
            let n = chunk.min(content_length - sent);
            if stream.write_all(&block[..n]).is_err() {
                return;
            }
            sent += n;
            std::thread::sleep(pause);
        }
    });
    addr
}
