//! CLI output: error mapping and text/json rendering.

use crate::catalog::EventCatalog;
use crate::error::TicsError;
use crate::session::DropReason;
use crate::transport::OutboundRequest;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

/// Map client errors to a string for CLI output.
pub fn map_error(e: &TicsError) -> String {
    match e.diagnostic_code() {
        Some(code) => format!("{} [code {}]", e, code),
        None => e.to_string(),
    }
}

pub fn format_catalog_text(catalog: &EventCatalog) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Code", "Name"]);
    for descriptor in catalog.event_types() {
        table.add_row(vec![
            "type".to_string(),
            descriptor.code.to_string(),
            descriptor.display_name.clone(),
        ]);
    }
    for descriptor in catalog.event_subtypes() {
        table.add_row(vec![
            "subtype".to_string(),
            descriptor.code.to_string(),
            descriptor.display_name.clone(),
        ]);
    }
    format!("Catalog version {}\n{}", catalog.version(), table)
}

pub fn format_catalog_json(catalog: &EventCatalog) -> Result<String, TicsError> {
    let value = json!({
        "version": catalog.version(),
        "types": catalog.event_types(),
        "subtypes": catalog.event_subtypes(),
    });
    serde_json::to_string_pretty(&value).map_err(|e| TicsError::MalformedPayload(e.to_string()))
}

pub fn format_dropped(operation: &str, reason: DropReason) -> String {
    format!("{} dropped: {}", operation, reason)
}

/// One line per recorded request, in send order.
pub fn format_requests(requests: &[OutboundRequest]) -> String {
    requests
        .iter()
        .map(|r| format!("GET {}{}", r.host, r.path_and_query()))
        .collect::<Vec<_>>()
        .join("\n")
}
