//! Wire format: operation kinds, query payloads, and the request encoder/decoder.
//!
//! Every request is a GET whose query string is built here. Field order is deterministic so
//! a payload can be reconstructed byte for byte from the record it came from.

pub mod decoder;
pub mod encoder;
pub mod operation;
pub mod payload;

pub use decoder::decode_event;
pub use encoder::{
    encode_event, encode_is_authorised, encode_open_session, encode_register_subtype,
    encode_register_type, encode_set_authorised,
};
pub use operation::OperationKind;
pub use payload::EncodedPayload;

/// Query keys used on the wire.
pub mod keys {
    pub const TICK: &str = "tick";
    pub const EVENT_TYPE: &str = "et";
    pub const EVENT_SUBTYPE: &str = "est";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const Z: &str = "z";
    pub const MAGNITUDE: &str = "m";
    pub const DATA: &str = "data";
    pub const ID: &str = "id";
    pub const BUILD: &str = "build";
    pub const VERSION: &str = "v";
    pub const REGISTER_EVENT: &str = "ev";
    pub const REGISTER_SUBEVENT: &str = "subev";
    pub const NAME: &str = "name";
    pub const AUTH: &str = "auth";
}
