//! WebTics: gameplay and application telemetry client
//!
//! Records typed events under an explicit metric/play session lifecycle and relays them to a
//! WebTics collection backend over HTTP.

pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod ids;
pub mod logging;
pub mod notify;
pub mod session;
pub mod transport;
pub mod wire;

pub use catalog::{EventCatalog, EventDescriptor, EventSubtype, EventType};
pub use client::global::{global, install};
pub use client::{TicsClient, TicsClientBuilder};
pub use config::{ConfigLoader, TicsConfig};
pub use endpoint::EndpointConfig;
pub use error::TicsError;
pub use event::EventRecord;
pub use notify::ClientEvent;
pub use session::{DropReason, Outcome, SessionPhase, SessionSnapshot};
pub use transport::{HttpTransport, HttpTransportOptions, MemoryTransport, Transport};
pub use wire::OperationKind;
