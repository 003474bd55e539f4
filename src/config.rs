//! Configuration System
//!
//! Layered configuration for the endpoint, the client and logging. Sources, lowest precedence
//! first: built-in defaults, the global file, the workspace files, `WEBTICS__*` environment
//! variables.

use crate::endpoint::EndpointConfig;
use crate::error::TicsError;
use crate::logging::LoggingConfig;
use crate::transport::{HttpTransportOptions, DEFAULT_REPLY_LIMIT};
use crate::wire::OperationKind;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

pub use merge::merge_policy::ENV_PREFIX;
pub use sources::workspace_file::ENV_VAR;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicsConfig {
    #[serde(default)]
    pub endpoint: EndpointSettings,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how requests are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// http or https
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Whole-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Replies are cut to this many bytes
    #[serde(default = "default_reply_limit")]
    pub reply_limit: usize,

    /// Per-operation path overrides keyed by operation name, e.g. `log_event`
    #[serde(default)]
    pub paths: HashMap<String, String>,
}

fn default_host() -> String {
    crate::endpoint::DEFAULT_HOST.to_string()
}

fn default_base_path() -> String {
    crate::endpoint::DEFAULT_BASE_PATH.to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_reply_limit() -> usize {
    DEFAULT_REPLY_LIMIT
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            base_path: default_base_path(),
            scheme: default_scheme(),
            timeout_ms: default_timeout_ms(),
            reply_limit: default_reply_limit(),
            paths: HashMap::new(),
        }
    }
}

impl EndpointSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.scheme != "http" && self.scheme != "https" {
            return Err(format!(
                "Unknown scheme '{}' (must be 'http' or 'https')",
                self.scheme
            ));
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be positive".to_string());
        }
        if self.reply_limit == 0 {
            return Err("Reply limit must be positive".to_string());
        }
        for name in self.paths.keys() {
            OperationKind::from_str(name)?;
        }
        Ok(())
    }

    /// Endpoint with overrides resolved to operation kinds.
    pub fn to_endpoint(&self) -> Result<EndpointConfig, TicsError> {
        let mut endpoint = EndpointConfig::new(self.host.clone(), self.base_path.clone());
        for (name, path) in &self.paths {
            let kind = OperationKind::from_str(name).map_err(TicsError::Config)?;
            endpoint.set_override(kind, path.clone());
        }
        Ok(endpoint)
    }

    pub fn to_transport_options(&self) -> HttpTransportOptions {
        HttpTransportOptions {
            scheme: self.scheme.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            reply_limit: self.reply_limit,
        }
    }
}

/// Client behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Gate for debug-only events; unset means "on in debug builds"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,

    /// Build identifier sent when a metric session opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Endpoint: {0}")]
    Endpoint(String),
    #[error("Client: {0}")]
    Client(String),
    #[error("Logging: {0}")]
    Logging(String),
}

impl TicsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.endpoint.validate() {
            errors.push(ValidationError::Endpoint(e));
        }
        if let Some(build) = &self.client.build_number {
            if build.trim().is_empty() {
                errors.push(ValidationError::Client(
                    "Build number cannot be blank".to_string(),
                ));
            }
        }
        if let Err(e) = crate::logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_toml(&self) -> Result<String, TicsError> {
        toml::to_string_pretty(self).map_err(|e| TicsError::Config(e.to_string()))
    }
}

/// Loads [`TicsConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration for `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<TicsConfig, TicsError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = merge::merge_policy::add_env_overrides(builder);

        let config: TicsConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    /// Load one explicit file on top of the defaults. Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<TicsConfig, TicsError> {
        if !path.exists() {
            return Err(TicsError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()));
        let builder = merge::merge_policy::add_env_overrides(builder);

        let config: TicsConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    /// Parse a TOML document with no other layers.
    pub fn from_toml_str(toml: &str) -> Result<TicsConfig, TicsError> {
        let config: TicsConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::checked(config)
    }

    /// Path of the global file, whether or not it exists.
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    fn checked(config: TicsConfig) -> Result<TicsConfig, TicsError> {
        config.validate().map_err(|errors| {
            TicsError::Config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        debug!(
            host = %config.endpoint.host,
            base_path = %config.endpoint.base_path,
            "configuration loaded"
        );
        Ok(config)
    }
}
