//! Session State Machine
//!
//! A metric session wraps zero or more consecutive play sessions. Events can only be logged
//! while a play session is active. Operations attempted in the wrong phase are dropped without
//! touching the wire and report why through [`Outcome::Dropped`].

mod machine;
mod outcome;
mod state;

pub use machine::SessionMachine;
pub use outcome::{DropReason, Outcome};
pub use state::{MetricSession, SessionPhase, SessionSnapshot, SessionState};

use crate::error::TicsError;
use crate::wire::{EncodedPayload, OperationKind};

/// Sends one request of a given kind to the configured backend.
///
/// When `wants_reply` is set, implementations return the trimmed, non-empty reply or
/// [`TicsError::EmptyResponse`].
pub trait Dispatch {
    fn dispatch(
        &self,
        kind: OperationKind,
        payload: EncodedPayload,
        wants_reply: bool,
    ) -> Result<Option<String>, TicsError>;

    /// Dispatch and require a reply.
    fn request(&self, kind: OperationKind, payload: EncodedPayload) -> Result<String, TicsError> {
        self.dispatch(kind, payload, true)?
            .ok_or(TicsError::EmptyResponse(kind))
    }

    /// Dispatch without waiting for a reply body.
    fn fire(&self, kind: OperationKind, payload: EncodedPayload) -> Result<(), TicsError> {
        self.dispatch(kind, payload, false).map(|_| ())
    }
}
