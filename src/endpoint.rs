//! Backend endpoint: host, base path, and per-operation path overrides.

use crate::wire::OperationKind;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_BASE_PATH: &str = "/WebTics/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    pub host: String,
    pub base_path: String,
    pub path_overrides: HashMap<OperationKind, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_BASE_PATH)
    }
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            base_path: base_path.into(),
            path_overrides: HashMap::new(),
        }
    }

    /// No host; every request fails with `NotInitialized` until configured.
    pub fn unconfigured() -> Self {
        Self::new("", "")
    }

    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty()
    }

    pub fn set_override(&mut self, kind: OperationKind, path: impl Into<String>) {
        self.path_overrides.insert(kind, path.into());
    }

    pub fn clear_override(&mut self, kind: OperationKind) -> Option<String> {
        self.path_overrides.remove(&kind)
    }

    /// Operation path: the override if present, the default otherwise.
    pub fn operation_path(&self, kind: OperationKind) -> &str {
        self.path_overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_path())
    }

    /// Base path joined with the operation path, with exactly one `/` at the seam.
    pub fn path_for(&self, kind: OperationKind) -> String {
        join_path(&self.base_path, self.operation_path(kind))
    }
}

fn join_path(base: &str, operation: &str) -> String {
    let base = base.trim_end_matches('/');
    let operation = operation.trim_start_matches('/');
    let mut path = String::with_capacity(base.len() + operation.len() + 2);
    if !base.starts_with('/') {
        path.push('/');
    }
    path.push_str(base);
    if !operation.is_empty() {
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(operation);
    }
    path
}
