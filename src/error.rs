//! Error types for the WebTics telemetry client.

use crate::transport::TransportError;
use crate::wire::OperationKind;
use thiserror::Error;

/// Client-level errors.
///
/// Session guard violations are not errors; they surface as
/// [`Outcome::Dropped`](crate::session::Outcome::Dropped).
#[derive(Debug, Error)]
pub enum TicsError {
    #[error("WebTics not initialised: no backend host configured")]
    NotInitialized,

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Zero length response received for {0}")]
    EmptyResponse(OperationKind),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid event catalog: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("A global WebTics client is already installed")]
    AlreadyInstalled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TicsError {
    /// Diagnostic code carried by a transport failure, if any.
    pub fn diagnostic_code(&self) -> Option<u16> {
        match self {
            TicsError::Transport(err) => err.status,
            _ => None,
        }
    }
}

impl From<config::ConfigError> for TicsError {
    fn from(err: config::ConfigError) -> Self {
        TicsError::Config(err.to_string())
    }
}
