//! Binds the endpoint to a transport for one locked operation.

use crate::endpoint::EndpointConfig;
use crate::error::TicsError;
use crate::session::Dispatch;
use crate::transport::{OutboundRequest, Transport};
use crate::wire::{EncodedPayload, OperationKind};
use tracing::{debug, warn};

pub struct Dispatcher<'a> {
    endpoint: &'a EndpointConfig,
    transport: &'a dyn Transport,
}

impl<'a> Dispatcher<'a> {
    pub fn new(endpoint: &'a EndpointConfig, transport: &'a dyn Transport) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    fn outbound(
        &self,
        kind: OperationKind,
        payload: EncodedPayload,
        wants_reply: bool,
    ) -> OutboundRequest {
        OutboundRequest {
            kind,
            host: self.endpoint.host.clone(),
            path: self.endpoint.path_for(kind),
            payload,
            wants_reply,
        }
    }
}

impl Dispatch for Dispatcher<'_> {
    fn dispatch(
        &self,
        kind: OperationKind,
        payload: EncodedPayload,
        wants_reply: bool,
    ) -> Result<Option<String>, TicsError> {
        if !self.endpoint.is_configured() {
            return Err(TicsError::NotInitialized);
        }

        let request = self.outbound(kind, payload, wants_reply);
        debug!(operation = %kind, path = %request.path, "sending request");
        let reply = self.transport.send(&request).map_err(|err| {
            warn!(operation = %kind, error = %err, "request failed");
            TicsError::from(err)
        })?;

        if !wants_reply {
            return Ok(None);
        }
        match reply.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(Some(text.to_string())),
            _ => {
                warn!(operation = %kind, "zero length response received");
                Err(TicsError::EmptyResponse(kind))
            }
        }
    }
}
