//! Operation kinds and their default endpoint paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every backend operation the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    OpenMetricSession,
    CloseMetricSession,
    RegisterEvents,
    StartPlaySession,
    StopPlaySession,
    RequestParameters,
    LogEvent,
    IsAuthorised,
    SetAuthorised,
}

impl OperationKind {
    pub const ALL: [OperationKind; 9] = [
        OperationKind::OpenMetricSession,
        OperationKind::CloseMetricSession,
        OperationKind::RegisterEvents,
        OperationKind::StartPlaySession,
        OperationKind::StopPlaySession,
        OperationKind::RequestParameters,
        OperationKind::LogEvent,
        OperationKind::IsAuthorised,
        OperationKind::SetAuthorised,
    ];

    /// Path used when no override is configured.
    ///
    /// Setting authorisation shares the is-authorised script.
    pub fn default_path(self) -> &'static str {
        match self {
            OperationKind::OpenMetricSession => "/openMetricSession.php",
            OperationKind::CloseMetricSession => "/closeMetricSession.php",
            OperationKind::RegisterEvents => "/registerEvents.php",
            OperationKind::StartPlaySession => "/startPlaySession.php",
            OperationKind::StopPlaySession => "/stopPlaySession.php",
            OperationKind::RequestParameters => "/requestParameters.php",
            OperationKind::LogEvent => "/logEvent.php",
            OperationKind::IsAuthorised => "/isAuthorised.php",
            OperationKind::SetAuthorised => "/isAuthorised.php",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::OpenMetricSession => "open_metric_session",
            OperationKind::CloseMetricSession => "close_metric_session",
            OperationKind::RegisterEvents => "register_events",
            OperationKind::StartPlaySession => "start_play_session",
            OperationKind::StopPlaySession => "stop_play_session",
            OperationKind::RequestParameters => "request_parameters",
            OperationKind::LogEvent => "log_event",
            OperationKind::IsAuthorised => "is_authorised",
            OperationKind::SetAuthorised => "set_authorised",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}
