//! Transport Port
//!
//! The only part of the client that performs I/O. A transport sends one request per call and,
//! when asked, hands back a bounded textual reply. Retries are never attempted here.

use crate::wire::{EncodedPayload, OperationKind};
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod memory;

pub use http::{HttpTransport, HttpTransportOptions};
pub use memory::MemoryTransport;

/// Maximum reply size kept by default, in bytes.
pub const DEFAULT_REPLY_LIMIT: usize = 2048;

/// One outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub kind: OperationKind,
    pub host: String,
    /// Base path joined with the operation path.
    pub path: String,
    pub payload: EncodedPayload,
    pub wants_reply: bool,
}

impl OutboundRequest {
    /// `path[?query]`
    pub fn path_and_query(&self) -> String {
        if self.payload.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.payload.to_query())
        }
    }
}

/// Capability to deliver encoded payloads to the backend.
pub trait Transport: Send + Sync {
    /// Send `request`. Returns `Ok(Some(reply))` only when a reply was requested.
    fn send(&self, request: &OutboundRequest) -> Result<Option<String>, TransportError>;
}

/// Where in the request lifecycle a transport failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStage {
    Build,
    Connect,
    Send,
    Status,
    Read,
}

impl fmt::Display for TransportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportStage::Build => "build",
            TransportStage::Connect => "connect",
            TransportStage::Send => "send",
            TransportStage::Status => "status",
            TransportStage::Read => "read",
        };
        f.write_str(name)
    }
}

/// Transport failure with a diagnostic code where one exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{stage} stage failed{}: {message}",
    .status.map(|s| format!(" (status {})", s)).unwrap_or_default()
)]
pub struct TransportError {
    pub stage: TransportStage,
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(stage: TransportStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Cut `reply` down to at most `limit` bytes without splitting a character.
pub fn truncate_reply(mut reply: String, limit: usize) -> String {
    if reply.len() > limit {
        let mut end = limit;
        while !reply.is_char_boundary(end) {
            end -= 1;
        }
        reply.truncate(end);
    }
    reply
}
