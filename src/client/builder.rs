use crate::catalog::EventCatalog;
use crate::client::{ClientInner, TicsClient};
use crate::config::TicsConfig;
use crate::endpoint::EndpointConfig;
use crate::error::TicsError;
use crate::notify::NotificationBus;
use crate::session::SessionMachine;
use crate::transport::{HttpTransport, HttpTransportOptions, Transport};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`TicsClient`].
///
/// Defaults: blocking HTTP transport, `localhost` + `/WebTics/`, the standard catalog, and
/// debug mode on in debug builds only.
pub struct TicsClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    http_options: HttpTransportOptions,
    endpoint: EndpointConfig,
    catalog: Option<Arc<EventCatalog>>,
    debug_mode: bool,
    build_number: Option<String>,
}

impl Default for TicsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TicsClientBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            http_options: HttpTransportOptions::default(),
            endpoint: EndpointConfig::default(),
            catalog: None,
            debug_mode: cfg!(debug_assertions),
            build_number: None,
        }
    }

    /// Start from loaded configuration.
    pub fn from_config(config: &TicsConfig) -> Result<Self, TicsError> {
        let mut builder = Self::new()
            .endpoint(config.endpoint.to_endpoint()?)
            .http_options(config.endpoint.to_transport_options());
        if let Some(debug_mode) = config.client.debug_mode {
            builder = builder.debug_mode(debug_mode);
        }
        if let Some(build_number) = &config.client.build_number {
            builder = builder.build_number(build_number.clone());
        }
        Ok(builder)
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Options for the default HTTP transport; ignored when a transport is supplied.
    pub fn http_options(mut self, options: HttpTransportOptions) -> Self {
        self.http_options = options;
        self
    }

    pub fn endpoint(mut self, endpoint: EndpointConfig) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Leave the host empty; requests fail with `NotInitialized` until `configure` is called.
    pub fn unconfigured(mut self) -> Self {
        self.endpoint = EndpointConfig::unconfigured();
        self
    }

    pub fn catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Build identifier sent with every metric session open.
    pub fn build_number(mut self, build_number: impl Into<String>) -> Self {
        self.build_number = Some(build_number.into());
        self
    }

    pub fn build(self) -> Result<TicsClient, TicsError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.http_options)?),
        };
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(EventCatalog::standard()));

        debug!(
            host = %self.endpoint.host,
            base_path = %self.endpoint.base_path,
            debug_mode = self.debug_mode,
            catalog_version = %catalog.version(),
            "client built"
        );

        Ok(TicsClient {
            inner: Mutex::new(ClientInner {
                endpoint: self.endpoint,
                session: SessionMachine::new(self.debug_mode),
            }),
            transport,
            catalog,
            bus: NotificationBus::new(),
            build_number: self.build_number,
        })
    }
}

impl TicsClient {
    /// Build a client with the HTTP transport from loaded configuration.
    pub fn from_config(config: &TicsConfig) -> Result<Self, TicsError> {
        TicsClientBuilder::from_config(config)?.build()
    }
}
