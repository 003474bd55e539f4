//! Integration tests for the WebTics telemetry client

mod support;

mod config_loading;
mod global_handle;
mod http_transport;
mod scenarios;
