//! Session state. Tokens live inside the phase that owns them, so a play token can only
//! exist while a play session is active and a metric token only while a metric session is open.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Closed,
    MetricOpen,
    PlayActive,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Closed => "closed",
            SessionPhase::MetricOpen => "metric_open",
            SessionPhase::PlayActive => "play_active",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSession {
    token: String,
    started: Instant,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Closed,
    MetricOpen(MetricSession),
    PlayActive {
        metric: MetricSession,
        play_token: String,
    },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Closed => SessionPhase::Closed,
            SessionState::MetricOpen(_) => SessionPhase::MetricOpen,
            SessionState::PlayActive { .. } => SessionPhase::PlayActive,
        }
    }

    fn metric(&self) -> Option<&MetricSession> {
        match self {
            SessionState::Closed => None,
            SessionState::MetricOpen(metric) => Some(metric),
            SessionState::PlayActive { metric, .. } => Some(metric),
        }
    }

    pub fn metric_token(&self) -> Option<&str> {
        self.metric().map(|m| m.token.as_str())
    }

    pub fn play_token(&self) -> Option<&str> {
        match self {
            SessionState::PlayActive { play_token, .. } => Some(play_token),
            _ => None,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.metric().map(|m| m.started_at)
    }

    /// Milliseconds since the metric session opened, from a monotonic clock.
    pub fn elapsed_millis(&self) -> Option<u64> {
        self.metric()
            .map(|m| u64::try_from(m.started.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    /// `Closed -> MetricOpen`. Callers check the phase first.
    pub(crate) fn open(&mut self, token: String) {
        debug_assert_eq!(self.phase(), SessionPhase::Closed);
        *self = SessionState::MetricOpen(MetricSession {
            token,
            started: Instant::now(),
            started_at: Utc::now(),
        });
    }

    /// `MetricOpen -> PlayActive`.
    pub(crate) fn start_play(&mut self, play_token: String) {
        if let SessionState::MetricOpen(metric) = std::mem::take(self) {
            *self = SessionState::PlayActive { metric, play_token };
        }
    }

    /// `PlayActive -> MetricOpen`.
    pub(crate) fn stop_play(&mut self) {
        match std::mem::take(self) {
            SessionState::PlayActive { metric, .. } => *self = SessionState::MetricOpen(metric),
            other => *self = other,
        }
    }

    /// Any phase `-> Closed`.
    pub(crate) fn close(&mut self) {
        *self = SessionState::Closed;
    }

    pub fn snapshot(&self, debug_logging: bool) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            metric_token: self.metric_token().map(str::to_string),
            play_token: self.play_token().map(str::to_string),
            started_at: self.started_at(),
            elapsed_ms: self.elapsed_millis(),
            debug_logging,
        }
    }
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub metric_token: Option<String>,
    pub play_token: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_ms: Option<u64>,
    pub debug_logging: bool,
}
