//! In-memory transport that records requests and answers from a script.
//!
//! Useful for tests and for dry runs of the CLI: nothing leaves the process.

use crate::transport::{OutboundRequest, Transport, TransportError};
use crate::wire::OperationKind;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};

type Scripted = Result<String, TransportError>;

#[derive(Default)]
struct MemoryState {
    requests: Vec<OutboundRequest>,
    scripted: HashMap<OperationKind, VecDeque<Scripted>>,
    failing: HashMap<OperationKind, TransportError>,
    silent: HashSet<OperationKind>,
}

/// Recording transport.
///
/// Unscripted replies: open-metric-session answers `metric-<n>`, start-play-session answers
/// `play-<n>`, is-authorised answers `false`, everything else answers `ok`; `<n>` is the
/// 1-based index of the request.
#[derive(Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reply for the next request of `kind`.
    pub fn reply_with(&self, kind: OperationKind, reply: impl Into<String>) {
        self.state
            .lock()
            .scripted
            .entry(kind)
            .or_default()
            .push_back(Ok(reply.into()));
    }

    /// Queue one failure for the next request of `kind`.
    pub fn fail_next(&self, kind: OperationKind, error: TransportError) {
        self.state
            .lock()
            .scripted
            .entry(kind)
            .or_default()
            .push_back(Err(error));
    }

    /// Fail every request of `kind` until [`MemoryTransport::recover`] is called.
    pub fn fail_always(&self, kind: OperationKind, error: TransportError) {
        self.state.lock().failing.insert(kind, error);
    }

    pub fn recover(&self, kind: OperationKind) {
        self.state.lock().failing.remove(&kind);
    }

    /// Answer requests of `kind` with an empty reply.
    pub fn reply_empty(&self, kind: OperationKind) {
        self.state.lock().silent.insert(kind);
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.state.lock().requests.clone()
    }

    pub fn requests_for(&self, kind: OperationKind) -> Vec<OutboundRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    pub fn kinds(&self) -> Vec<OperationKind> {
        self.state.lock().requests.iter().map(|r| r.kind).collect()
    }

    pub fn count(&self) -> usize {
        self.state.lock().requests.len()
    }

    pub fn last(&self) -> Option<OutboundRequest> {
        self.state.lock().requests.last().cloned()
    }

    pub fn clear(&self) {
        self.state.lock().requests.clear();
    }
}

impl Transport for MemoryTransport {
    fn send(&self, request: &OutboundRequest) -> Result<Option<String>, TransportError> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        let seq = state.requests.len();

        if let Some(error) = state.failing.get(&request.kind) {
            return Err(error.clone());
        }

        let scripted = state
            .scripted
            .get_mut(&request.kind)
            .and_then(VecDeque::pop_front);
        let reply = match scripted {
            Some(Ok(reply)) => reply,
            Some(Err(error)) => return Err(error),
            None if state.silent.contains(&request.kind) => String::new(),
            None => default_reply(request.kind, seq),
        };

        Ok(request.wants_reply.then_some(reply))
    }
}

fn default_reply(kind: OperationKind, seq: usize) -> String {
    match kind {
        OperationKind::OpenMetricSession => format!("metric-{}", seq),
        OperationKind::StartPlaySession => format!("play-{}", seq),
        OperationKind::IsAuthorised => "false".to_string(),
        _ => "ok".to_string(),
    }
}
