//! Process-wide client handle

use std::sync::Arc;
use webtics::{EndpointConfig, MemoryTransport, TicsClient, TicsError};

// The handle is process-wide, so this is the only test that touches it.
#[test]
fn test_install_then_global_returns_installed_client() {
    let transport = Arc::new(MemoryTransport::new());
    let client = TicsClient::builder()
        .transport(transport.clone())
        .endpoint(EndpointConfig::new("global.test", "/g/"))
        .build()
        .unwrap();

    let installed = webtics::install(client).unwrap();
    let global = webtics::global().unwrap();
    assert!(std::ptr::eq(installed, global));
    assert_eq!(global.endpoint().host, "global.test");

    global.open_metric_session("p1").unwrap();
    assert_eq!(transport.count(), 1);

    let second = TicsClient::builder()
        .transport(Arc::new(MemoryTransport::new()))
        .build()
        .unwrap();
    assert!(matches!(
        webtics::install(second),
        Err(TicsError::AlreadyInstalled)
    ));
    assert!(webtics::client::global::is_installed());
    global.close_metric_session().unwrap();
}
