//! Built-in defaults and the environment override layer.

use crate::endpoint::{DEFAULT_BASE_PATH, DEFAULT_HOST};
use crate::transport::DEFAULT_REPLY_LIMIT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

pub const ENV_PREFIX: &str = "WEBTICS";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("endpoint.host", DEFAULT_HOST)?
        .set_default("endpoint.base_path", DEFAULT_BASE_PATH)?
        .set_default("endpoint.scheme", "http")?
        .set_default("endpoint.timeout_ms", 10_000i64)?
        .set_default("endpoint.reply_limit", DEFAULT_REPLY_LIMIT as i64)
}

/// `WEBTICS__ENDPOINT__HOST=...` and friends; applied last.
pub fn add_env_overrides(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
