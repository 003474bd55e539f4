//! Guarded session transitions.

use crate::error::TicsError;
use crate::event::EventRecord;
use crate::session::outcome::{DropReason, Outcome};
use crate::session::state::{SessionPhase, SessionSnapshot, SessionState};
use crate::session::Dispatch;
use crate::wire::{encode_event, encode_open_session, EncodedPayload, OperationKind};
use tracing::{debug, info, warn};

/// Owns the session state and performs every transition.
///
/// The machine does no locking; the client holds it behind a single mutex and keeps the lock
/// for the whole operation, request included.
#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
    debug_logging: bool,
}

impl SessionMachine {
    pub fn new(debug_logging: bool) -> Self {
        Self {
            state: SessionState::Closed,
            debug_logging,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn elapsed_millis(&self) -> Option<u64> {
        self.state.elapsed_millis()
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.debug_logging = enabled;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot(self.debug_logging)
    }

    /// Drop reason if no metric session is open.
    pub fn require_metric_session(&self) -> Option<DropReason> {
        match self.phase() {
            SessionPhase::Closed => Some(DropReason::NoMetricSession),
            _ => None,
        }
    }

    /// `Closed -> MetricOpen`. A duplicate open is dropped; a failed request leaves `Closed`.
    pub fn open_metric_session(
        &mut self,
        dispatch: &impl Dispatch,
        unique_id: &str,
        build: Option<&str>,
    ) -> Result<Outcome, TicsError> {
        if self.phase() != SessionPhase::Closed {
            debug!(unique_id = %unique_id, "metric session already open, ignoring open");
            return Ok(Outcome::Dropped(DropReason::MetricSessionAlreadyOpen));
        }

        let token = dispatch.request(
            OperationKind::OpenMetricSession,
            encode_open_session(unique_id, build),
        )?;
        self.state.open(token);
        info!(unique_id = %unique_id, "metric session opened");
        Ok(Outcome::Completed(()))
    }

    /// `MetricOpen | PlayActive -> Closed`, stopping an active play session first.
    ///
    /// Local state is cleared whatever the backend says; the first transport error, if any,
    /// is returned afterwards.
    pub fn close_metric_session(&mut self, dispatch: &impl Dispatch) -> Result<Outcome, TicsError> {
        let token = match self.state.metric_token() {
            Some(token) => token.to_string(),
            None => {
                debug!("no metric session open, ignoring close");
                return Ok(Outcome::Dropped(DropReason::NoMetricSession));
            }
        };

        let mut first_error = None;
        if self.phase() == SessionPhase::PlayActive {
            if let Err(err) = self.stop_play_session(dispatch) {
                first_error = Some(err);
            }
        }

        let result = dispatch.fire(
            OperationKind::CloseMetricSession,
            EncodedPayload::token(&token),
        );
        self.state.close();

        if let Err(err) = result {
            warn!(error = %err, "failed to notify backend of metric session close");
            first_error.get_or_insert(err);
        }
        info!("metric session closed");

        match first_error {
            Some(err) => Err(err),
            None => Ok(Outcome::Completed(())),
        }
    }

    /// `MetricOpen -> PlayActive`. A failed request leaves `MetricOpen`.
    pub fn start_play_session(&mut self, dispatch: &impl Dispatch) -> Result<Outcome, TicsError> {
        let token = match (self.phase(), self.state.metric_token()) {
            (SessionPhase::MetricOpen, Some(token)) if !token.is_empty() => token.to_string(),
            (SessionPhase::PlayActive, _) => {
                debug!("play session already active, ignoring start");
                return Ok(Outcome::Dropped(DropReason::PlaySessionAlreadyActive));
            }
            _ => {
                debug!("no metric session open, ignoring play session start");
                return Ok(Outcome::Dropped(DropReason::NoMetricSession));
            }
        };

        let play_token =
            dispatch.request(OperationKind::StartPlaySession, EncodedPayload::token(&token))?;
        self.state.start_play(play_token);
        info!("play session started");
        Ok(Outcome::Completed(()))
    }

    /// `PlayActive -> MetricOpen`. Local state moves on even if the request fails.
    pub fn stop_play_session(&mut self, dispatch: &impl Dispatch) -> Result<Outcome, TicsError> {
        if self.phase() != SessionPhase::PlayActive {
            debug!("no play session active, ignoring stop");
            return Ok(Outcome::Dropped(DropReason::NoPlaySession));
        }
        let token = self.state.metric_token().unwrap_or_default().to_string();

        let result = dispatch.fire(OperationKind::StopPlaySession, EncodedPayload::token(&token));
        self.state.stop_play();
        info!("play session stopped");

        match result {
            Ok(()) => Ok(Outcome::Completed(())),
            Err(err) => {
                warn!(error = %err, "failed to notify backend of play session stop");
                Err(err)
            }
        }
    }

    /// Send `record` stamped with the session's elapsed time. Requires an active play session.
    pub fn log_event(
        &self,
        dispatch: &impl Dispatch,
        record: &EventRecord,
    ) -> Result<Outcome<u64>, TicsError> {
        if self.phase() != SessionPhase::PlayActive {
            debug!(event_type = record.event_type, "no play session active, dropping event");
            return Ok(Outcome::Dropped(DropReason::NoPlaySession));
        }
        let tick = self.elapsed_millis().unwrap_or(0);

        dispatch.fire(OperationKind::LogEvent, encode_event(tick, record))?;
        debug!(
            event_type = record.event_type,
            subtype = record.subtype,
            tick,
            "event logged"
        );
        Ok(Outcome::Completed(tick))
    }

    /// [`SessionMachine::log_event`], only when debug logging is enabled.
    pub fn log_event_if_debug(
        &self,
        dispatch: &impl Dispatch,
        record: &EventRecord,
    ) -> Result<Outcome<u64>, TicsError> {
        if !self.debug_logging {
            return Ok(Outcome::Dropped(DropReason::DebugLoggingDisabled));
        }
        self.log_event(dispatch, record)
    }
}
