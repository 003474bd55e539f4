//! Process-wide client handle.
//!
//! Most embedders want one client reachable from anywhere. The handle is created on first use
//! from the layered configuration rooted at the working directory, or installed explicitly
//! before that.

use crate::client::TicsClient;
use crate::config::ConfigLoader;
use crate::error::TicsError;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL: OnceLock<TicsClient> = OnceLock::new();

/// The shared client, built from [`ConfigLoader::load`] on first call.
pub fn global() -> Result<&'static TicsClient, TicsError> {
    if let Some(client) = GLOBAL.get() {
        return Ok(client);
    }
    let config = ConfigLoader::load(Path::new("."))?;
    debug!(host = %config.endpoint.host, "building global client from configuration");
    let client = TicsClient::from_config(&config)?;
    // A racing caller may win; its client is kept and ours is dropped unused.
    Ok(GLOBAL.get_or_init(|| client))
}

/// Install `client` as the shared client. Fails once a client exists.
pub fn install(client: TicsClient) -> Result<&'static TicsClient, TicsError> {
    GLOBAL
        .set(client)
        .map_err(|_| TicsError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(TicsError::NotInitialized)
}

pub fn is_installed() -> bool {
    GLOBAL.get().is_some()
}
