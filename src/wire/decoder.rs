//! Decoding of event payloads back into records.

use crate::error::TicsError;
use crate::event::EventRecord;
use crate::wire::keys;
use crate::wire::payload::EncodedPayload;
use std::str::FromStr;

/// Decode a log-event payload into its tick and record.
///
/// `tick` and `et` are required; the remaining numeric fields default to zero when absent.
pub fn decode_event(payload: &EncodedPayload) -> Result<(u64, EventRecord), TicsError> {
    let tick = required::<u64>(payload, keys::TICK)?;
    let record = EventRecord {
        event_type: required(payload, keys::EVENT_TYPE)?,
        subtype: optional(payload, keys::EVENT_SUBTYPE)?.unwrap_or(0),
        x: optional(payload, keys::X)?.unwrap_or(0),
        y: optional(payload, keys::Y)?.unwrap_or(0),
        z: optional(payload, keys::Z)?.unwrap_or(0),
        magnitude: optional(payload, keys::MAGNITUDE)?.unwrap_or(0.0),
        data: payload.decoded(keys::DATA)?.filter(|d| !d.is_empty()),
    };
    Ok((tick, record))
}

fn required<T: FromStr>(payload: &EncodedPayload, key: &str) -> Result<T, TicsError> {
    optional(payload, key)?
        .ok_or_else(|| TicsError::MalformedPayload(format!("missing field '{}'", key)))
}

fn optional<T: FromStr>(payload: &EncodedPayload, key: &str) -> Result<Option<T>, TicsError> {
    match payload.decoded(key)? {
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            TicsError::MalformedPayload(format!("field '{}' is not numeric: '{}'", key, value))
        }),
        None => Ok(None),
    }
}
