//! In-process notification bus for client events.
//!
//! Subscribers get their own channel receiver. Sending never blocks and never calls back into
//! the client, so a subscriber may freely use the client from its own thread.

use crate::session::DropReason;
use crate::wire::OperationKind;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    MetricSessionOpened { unique_id: String },
    MetricSessionClosed,
    PlaySessionStarted,
    PlaySessionStopped,
    EventLogged { event_type: i32, tick: u64 },
    CatalogRegistered { entries: usize },
    Dropped { operation: OperationKind, reason: DropReason },
    Failed { operation: OperationKind, error: String },
}

#[derive(Default)]
pub struct NotificationBus {
    senders: Mutex<Vec<Sender<ClientEvent>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<ClientEvent> {
        let (sender, receiver) = channel();
        self.senders.lock().push(sender);
        receiver
    }

    /// Deliver to every live subscriber; hung-up subscribers are forgotten.
    pub fn emit(&self, event: ClientEvent) {
        let mut senders = self.senders.lock();
        if senders.is_empty() {
            return;
        }
        senders.retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().len()
    }
}
