//! Request encoder.

use crate::catalog::EventDescriptor;
use crate::event::EventRecord;
use crate::wire::keys;
use crate::wire::payload::EncodedPayload;

/// Encode an event as `tick, et, est, x, y, z, m[, data]`.
///
/// `f64` formatting is Rust's shortest round-trip representation, so `1.0` is sent as `1`.
pub fn encode_event(tick: u64, record: &EventRecord) -> EncodedPayload {
    let mut payload = EncodedPayload::new()
        .with(keys::TICK, tick.to_string())
        .with(keys::EVENT_TYPE, record.event_type.to_string())
        .with(keys::EVENT_SUBTYPE, record.subtype.to_string())
        .with(keys::X, record.x.to_string())
        .with(keys::Y, record.y.to_string())
        .with(keys::Z, record.z.to_string())
        .with(keys::MAGNITUDE, record.magnitude.to_string());
    if let Some(data) = record.wire_data() {
        payload.push(keys::DATA, data);
    }
    payload
}

pub fn encode_open_session(unique_id: &str, build: Option<&str>) -> EncodedPayload {
    let mut payload = EncodedPayload::new().with(keys::ID, unique_id);
    if let Some(build) = build.filter(|b| !b.is_empty()) {
        payload.push(keys::BUILD, build);
    }
    payload
}

pub fn encode_register_type(version: &str, descriptor: &EventDescriptor) -> EncodedPayload {
    EncodedPayload::new()
        .with(keys::VERSION, version)
        .with(keys::REGISTER_EVENT, descriptor.code.to_string())
        .with(keys::NAME, &descriptor.display_name)
}

pub fn encode_register_subtype(version: &str, descriptor: &EventDescriptor) -> EncodedPayload {
    EncodedPayload::new()
        .with(keys::VERSION, version)
        .with(keys::REGISTER_SUBEVENT, descriptor.code.to_string())
        .with(keys::NAME, &descriptor.display_name)
}

pub fn encode_is_authorised(unique_id: &str) -> EncodedPayload {
    EncodedPayload::new().with(keys::ID, unique_id)
}

pub fn encode_set_authorised(unique_id: &str, auth: bool) -> EncodedPayload {
    EncodedPayload::new()
        .with(keys::ID, unique_id)
        .with(keys::AUTH, if auth { "true" } else { "false" })
}
