//! Blocking HTTP transport backed by `reqwest`.

use crate::error::TicsError;
use crate::transport::{
    truncate_reply, OutboundRequest, Transport, TransportError, TransportStage,
    DEFAULT_REPLY_LIMIT,
};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportOptions {
    /// `http` or `https`; ignored when the host already carries a scheme.
    pub scheme: String,
    /// Bound on a whole request, including reading the reply.
    pub timeout: Duration,
    /// Replies longer than this many bytes are truncated.
    pub reply_limit: usize,
}

impl Default for HttpTransportOptions {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            reply_limit: DEFAULT_REPLY_LIMIT,
        }
    }
}

pub struct HttpTransport {
    client: Client,
    options: HttpTransportOptions,
}

impl HttpTransport {
    pub fn new(options: HttpTransportOptions) -> Result<Self, TicsError> {
        let client = Client::builder()
            .user_agent(concat!("webtics/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()
            .map_err(|e| {
                TicsError::Transport(TransportError::new(
                    TransportStage::Build,
                    format!("Failed to create HTTP client: {}", e),
                ))
            })?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &HttpTransportOptions {
        &self.options
    }

    /// Absolute URL for `request`.
    pub fn url_for(&self, request: &OutboundRequest) -> String {
        let host = request.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}{}", host, request.path_and_query())
        } else {
            format!(
                "{}://{}{}",
                self.options.scheme,
                host,
                request.path_and_query()
            )
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &OutboundRequest) -> Result<Option<String>, TransportError> {
        let url = self.url_for(request);
        debug!(operation = %request.kind, url = %url, "sending request");

        let response = self.client.get(&url).send().map_err(map_send_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(TransportError::new(
                TransportStage::Status,
                status.canonical_reason().unwrap_or("HTTP error").to_string(),
            )
            .with_status(status.as_u16()));
        }

        if !request.wants_reply {
            return Ok(None);
        }

        let body = read_capped(response, self.options.reply_limit)?;
        Ok(Some(truncate_reply(body, self.options.reply_limit)))
    }
}

/// Read at most `limit` bytes of the body, plus enough to finish a split UTF-8 character.
/// The rest of the body is never read.
fn read_capped(response: impl Read, limit: usize) -> Result<String, TransportError> {
    let mut bytes = Vec::with_capacity(limit.min(DEFAULT_REPLY_LIMIT) + 3);
    response
        .take(limit as u64 + 3)
        .read_to_end(&mut bytes)
        .map_err(|e| {
            TransportError::new(TransportStage::Read, format!("Failed to read reply: {}", e))
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::new(TransportStage::Build, format!("Invalid request: {}", error))
    } else if error.is_connect() {
        TransportError::new(TransportStage::Connect, format!("Connection error: {}", error))
    } else if error.is_timeout() {
        TransportError::new(TransportStage::Send, format!("Request timeout: {}", error))
    } else {
        TransportError::new(TransportStage::Send, format!("HTTP error: {}", error))
    }
}
