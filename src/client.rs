//! Client Facade
//!
//! [`TicsClient`] is the entry point for embedding applications. It owns the endpoint
//! configuration and the session state behind one lock, and relays every operation through a
//! [`Transport`]. Create one per process and share it (`Arc`, or the handle in
//! [`global`](crate::global)).
//!
//! ```
//! use std::sync::Arc;
//! use webtics::{EventRecord, EventType, MemoryTransport, TicsClient};
//!
//! let transport = Arc::new(MemoryTransport::new());
//! let client = TicsClient::builder().transport(transport.clone()).build().unwrap();
//! client.configure("localhost", "/t/");
//!
//! client.open_metric_session("player-1").unwrap();
//! client.start_play_session().unwrap();
//! client.log_event(&EventRecord::with_magnitude(EventType::PlayerShoot, 1.0)).unwrap();
//! client.close_metric_session().unwrap();
//! assert_eq!(transport.count(), 5);
//! ```

mod builder;
mod dispatch;
pub mod global;

pub use builder::TicsClientBuilder;
pub use dispatch::Dispatcher;

use crate::catalog::EventCatalog;
use crate::endpoint::EndpointConfig;
use crate::error::TicsError;
use crate::event::EventRecord;
use crate::notify::{ClientEvent, NotificationBus};
use crate::session::{Dispatch, DropReason, Outcome, SessionMachine, SessionPhase, SessionSnapshot};
use crate::transport::Transport;
use crate::wire::{
    encode_is_authorised, encode_register_subtype, encode_register_type, encode_set_authorised,
    EncodedPayload, OperationKind,
};
use parking_lot::Mutex;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct ClientInner {
    endpoint: EndpointConfig,
    session: SessionMachine,
}

pub struct TicsClient {
    inner: Mutex<ClientInner>,
    transport: Arc<dyn Transport>,
    catalog: Arc<EventCatalog>,
    bus: NotificationBus,
    build_number: Option<String>,
}

impl TicsClient {
    pub fn builder() -> TicsClientBuilder {
        TicsClientBuilder::new()
    }

    /// Run `f` with the session machine and a dispatcher bound to the current endpoint.
    /// The lock is held for the whole call.
    fn with_session<R>(&self, f: impl FnOnce(&mut SessionMachine, &Dispatcher<'_>) -> R) -> R {
        let mut guard = self.inner.lock();
        let ClientInner { endpoint, session } = &mut *guard;
        let dispatcher = Dispatcher::new(endpoint, self.transport.as_ref());
        f(session, &dispatcher)
    }

    /// Broadcast the result of `operation` and hand it back unchanged.
    fn report<T>(
        &self,
        operation: OperationKind,
        result: Result<Outcome<T>, TicsError>,
        completed: impl FnOnce(&T) -> Option<ClientEvent>,
    ) -> Result<Outcome<T>, TicsError> {
        match &result {
            Ok(Outcome::Completed(value)) => {
                if let Some(event) = completed(value) {
                    self.bus.emit(event);
                }
            }
            Ok(Outcome::Dropped(reason)) => self.bus.emit(ClientEvent::Dropped {
                operation,
                reason: *reason,
            }),
            Err(err) => self.bus.emit(ClientEvent::Failed {
                operation,
                error: err.to_string(),
            }),
        }
        result
    }

    // Configuration

    /// Point the client at `host` and `base_path`. Takes effect on the next request.
    pub fn configure(&self, host: impl Into<String>, base_path: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.endpoint.host = host.into();
        inner.endpoint.base_path = base_path.into();
        info!(
            host = %inner.endpoint.host,
            base_path = %inner.endpoint.base_path,
            "endpoint configured"
        );
    }

    /// Replace the whole endpoint, overrides included.
    pub fn set_endpoint(&self, endpoint: EndpointConfig) {
        self.inner.lock().endpoint = endpoint;
    }

    pub fn set_endpoint_override(&self, kind: OperationKind, path: impl Into<String>) {
        let path = path.into();
        debug!(operation = %kind, path = %path, "endpoint path override set");
        self.inner.lock().endpoint.set_override(kind, path);
    }

    pub fn clear_endpoint_override(&self, kind: OperationKind) {
        self.inner.lock().endpoint.clear_override(kind);
    }

    pub fn endpoint(&self) -> EndpointConfig {
        self.inner.lock().endpoint.clone()
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.inner.lock().session.set_debug_logging(enabled);
    }

    pub fn debug_mode(&self) -> bool {
        self.inner.lock().session.debug_logging()
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn build_number(&self) -> Option<&str> {
        self.build_number.as_deref()
    }

    // Session control

    pub fn open_metric_session(&self, unique_id: &str) -> Result<Outcome, TicsError> {
        let build = self.build_number.as_deref();
        let result =
            self.with_session(|session, d| session.open_metric_session(d, unique_id, build));
        self.report(OperationKind::OpenMetricSession, result, |_| {
            Some(ClientEvent::MetricSessionOpened {
                unique_id: unique_id.to_string(),
            })
        })
    }

    /// Close the metric session, stopping any play session first. Local state is always
    /// cleared; an error means the backend may not have been told.
    pub fn close_metric_session(&self) -> Result<Outcome, TicsError> {
        let (was_playing, result) = self.with_session(|session, d| {
            let was_playing = session.phase() == SessionPhase::PlayActive;
            (was_playing, session.close_metric_session(d))
        });
        let closed = !matches!(result, Ok(Outcome::Dropped(_)));
        if was_playing && closed {
            self.bus.emit(ClientEvent::PlaySessionStopped);
        }
        if closed && result.is_err() {
            // Local state is closed even though the request failed.
            self.bus.emit(ClientEvent::MetricSessionClosed);
        }
        self.report(OperationKind::CloseMetricSession, result, |_| {
            Some(ClientEvent::MetricSessionClosed)
        })
    }

    pub fn start_play_session(&self) -> Result<Outcome, TicsError> {
        let result = self.with_session(|session, d| session.start_play_session(d));
        self.report(OperationKind::StartPlaySession, result, |_| {
            Some(ClientEvent::PlaySessionStarted)
        })
    }

    /// Stop the play session. Local state moves back to the metric session regardless of the
    /// request's fate.
    pub fn stop_play_session(&self) -> Result<Outcome, TicsError> {
        let result = self.with_session(|session, d| session.stop_play_session(d));
        if result.is_err() {
            self.bus.emit(ClientEvent::PlaySessionStopped);
        }
        self.report(OperationKind::StopPlaySession, result, |_| {
            Some(ClientEvent::PlaySessionStopped)
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().session.phase()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().session.snapshot()
    }

    /// Milliseconds since the metric session opened; `None` while closed.
    pub fn elapsed_millis(&self) -> Option<u64> {
        self.inner.lock().session.elapsed_millis()
    }

    // Events

    /// Log `record` if a play session is active. Returns the tick it was stamped with.
    pub fn log_event(&self, record: &EventRecord) -> Result<Outcome<u64>, TicsError> {
        let result = self.with_session(|session, d| session.log_event(d, record));
        self.report(OperationKind::LogEvent, result, |tick| {
            Some(ClientEvent::EventLogged {
                event_type: record.event_type,
                tick: *tick,
            })
        })
    }

    /// Like [`TicsClient::log_event`], but only while debug mode is on.
    pub fn log_event_if_debug(&self, record: &EventRecord) -> Result<Outcome<u64>, TicsError> {
        let result = self.with_session(|session, d| session.log_event_if_debug(d, record));
        self.report(OperationKind::LogEvent, result, |tick| {
            Some(ClientEvent::EventLogged {
                event_type: record.event_type,
                tick: *tick,
            })
        })
    }

    /// Push every catalog entry to the backend, types first then subtypes, one request each.
    /// Stops at the first failure. Requires an open metric session.
    pub fn register_catalog(&self) -> Result<Outcome<usize>, TicsError> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.with_session(|session, d| {
            if let Some(reason) = session.require_metric_session() {
                debug!("no metric session open, skipping catalog registration");
                return Ok(Outcome::Dropped(reason));
            }
            let version = catalog.version();
            let mut sent = 0usize;
            for descriptor in catalog.event_types() {
                d.fire(
                    OperationKind::RegisterEvents,
                    encode_register_type(version, descriptor),
                )?;
                sent += 1;
            }
            for descriptor in catalog.event_subtypes() {
                d.fire(
                    OperationKind::RegisterEvents,
                    encode_register_subtype(version, descriptor),
                )?;
                sent += 1;
            }
            info!(entries = sent, version = %version, "event catalog registered");
            Ok(Outcome::Completed(sent))
        });
        self.report(OperationKind::RegisterEvents, result, |entries| {
            Some(ClientEvent::CatalogRegistered { entries: *entries })
        })
    }

    // Authorisation and parameters

    /// Ask the backend whether `unique_id` is authorised. Only a `true` reply counts.
    pub fn is_authorised(&self, unique_id: &str) -> Result<bool, TicsError> {
        let result = self.with_session(|_, d| {
            d.request(OperationKind::IsAuthorised, encode_is_authorised(unique_id))
        });
        match result {
            Ok(reply) => Ok(reply == "true"),
            Err(err) => {
                self.bus.emit(ClientEvent::Failed {
                    operation: OperationKind::IsAuthorised,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn set_authorised(&self, unique_id: &str, auth: bool) -> Result<(), TicsError> {
        let result = self.with_session(|_, d| {
            d.fire(
                OperationKind::SetAuthorised,
                encode_set_authorised(unique_id, auth),
            )
        });
        if let Err(err) = &result {
            self.bus.emit(ClientEvent::Failed {
                operation: OperationKind::SetAuthorised,
                error: err.to_string(),
            });
        }
        result
    }

    /// Forward an opaque query and return the backend's reply. Requires an open metric session.
    pub fn request_parameters(&self, query: &str) -> Result<Outcome<String>, TicsError> {
        let result = self.with_session(|session, d| {
            if let Some(reason) = session.require_metric_session() {
                return Ok(Outcome::Dropped(reason));
            }
            d.request(OperationKind::RequestParameters, EncodedPayload::opaque(query))
                .map(Outcome::Completed)
        });
        self.report(OperationKind::RequestParameters, result, |_| None)
    }

    // Notifications

    pub fn subscribe(&self) -> Receiver<ClientEvent> {
        self.bus.subscribe()
    }

    /// Close whatever session is open. Errors are logged, not returned.
    pub fn shutdown(&self) {
        match self.close_metric_session() {
            Ok(Outcome::Completed(())) => info!("client shut down"),
            Ok(Outcome::Dropped(DropReason::NoMetricSession)) => {}
            Ok(Outcome::Dropped(_)) => {}
            Err(err) => warn!(error = %err, "session close on shutdown failed"),
        }
    }
}

impl Drop for TicsClient {
    fn drop(&mut self) {
        if self.inner.get_mut().session.phase() != SessionPhase::Closed {
            self.shutdown();
        }
    }
}
