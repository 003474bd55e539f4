//! Outcome of a guarded operation.

use serde::Serialize;
use std::fmt;

/// Why an operation was dropped without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MetricSessionAlreadyOpen,
    NoMetricSession,
    PlaySessionAlreadyActive,
    NoPlaySession,
    DebugLoggingDisabled,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::MetricSessionAlreadyOpen => "metric session already open",
            DropReason::NoMetricSession => "no metric session open",
            DropReason::PlaySessionAlreadyActive => "play session already active",
            DropReason::NoPlaySession => "no play session active",
            DropReason::DebugLoggingDisabled => "debug logging disabled",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an operation that passed or failed its session guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Completed(T),
    Dropped(DropReason),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Outcome::Dropped(_))
    }

    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            Outcome::Dropped(reason) => Some(*reason),
            Outcome::Completed(_) => None,
        }
    }

    /// The completed value, discarding the drop reason.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Dropped(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Dropped(reason) => Outcome::Dropped(reason),
        }
    }
}
