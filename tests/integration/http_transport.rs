//! Blocking HTTP transport against a local socket

use super::support::{serve, serve_trickle, Reply};
use std::sync::Arc;
use std::time::Duration;
use webtics::transport::{OutboundRequest, TransportStage};
use webtics::wire::EncodedPayload;
use webtics::{
    EndpointConfig, EventRecord, EventType, HttpTransport, HttpTransportOptions, OperationKind,
    TicsClient, TicsError, Transport,
};

fn options(reply_limit: usize) -> HttpTransportOptions {
    HttpTransportOptions {
        timeout: Duration::from_secs(5),
        reply_limit,
        ..Default::default()
    }
}

fn request(host: &str, kind: OperationKind, wants_reply: bool) -> OutboundRequest {
    OutboundRequest {
        kind,
        host: host.to_string(),
        path: format!("/t{}", kind.default_path()),
        payload: EncodedPayload::new().with("id", "p 1"),
        wants_reply,
    }
}

#[test]
fn test_get_carries_path_and_query() {
    let (addr, server) = serve(vec![Reply::ok("token-42")]);
    let transport = HttpTransport::new(options(2048)).unwrap();

    let reply = transport
        .send(&request(&addr, OperationKind::OpenMetricSession, true))
        .unwrap();

    assert_eq!(reply.as_deref(), Some("token-42"));
    let lines = server.join().unwrap();
    assert_eq!(lines[0], "GET /t/openMetricSession.php?id=p%201 HTTP/1.1");
}

#[test]
fn test_reply_is_truncated_to_limit() {
    let (addr, server) = serve(vec![Reply::ok("x".repeat(100))]);
    let transport = HttpTransport::new(options(16)).unwrap();

    let reply = transport
        .send(&request(&addr, OperationKind::RequestParameters, true))
        .unwrap()
        .unwrap();

    assert_eq!(reply.len(), 16);
    server.join().unwrap();
}

#[test]
fn test_large_slow_reply_is_truncated_not_timed_out() {
    // 64 MiB advertised, 64 KiB every 5 ms: the full body would take far longer than the timeout.
    let addr = serve_trickle(64 * 1024 * 1024, 64 * 1024, Duration::from_millis(5));
    let transport = HttpTransport::new(HttpTransportOptions {
        timeout: Duration::from_secs(3),
        reply_limit: 2048,
        ..Default::default()
    })
    .unwrap();

    let started = std::time::Instant::now();
    let reply = transport
        .send(&request(&addr, OperationKind::RequestParameters, true))
        .unwrap()
        .unwrap();

    assert_eq!(reply.len(), 2048);
    assert!(reply.bytes().all(|b| b == b'x'));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_fire_and_forget_returns_no_reply() {
    let (addr, server) = serve(vec![Reply::ok("ignored")]);
    let transport = HttpTransport::new(options(2048)).unwrap();

    let reply = transport
        .send(&request(&addr, OperationKind::LogEvent, false))
        .unwrap();

    assert!(reply.is_none());
    server.join().unwrap();
}

#[test]
fn test_error_status_is_a_failure_with_code() {
    let (addr, server) = serve(vec![Reply::status("404 Not Found")]);
    let transport = HttpTransport::new(options(2048)).unwrap();

    let err = transport
        .send(&request(&addr, OperationKind::LogEvent, false))
        .unwrap_err();

    assert_eq!(err.stage, TransportStage::Status);
    assert_eq!(err.status, Some(404));
    server.join().unwrap();
}

#[test]
fn test_connection_refused_is_connect_failure() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let transport = HttpTransport::new(options(2048)).unwrap();

    let err = transport
        .send(&request(&addr, OperationKind::LogEvent, false))
        .unwrap_err();
    assert_eq!(err.stage, TransportStage::Connect);
    assert_eq!(err.status, None);
}

#[test]
fn test_client_session_over_http() {
    let (addr, server) = serve(vec![
        Reply::ok("metric-token\r\n"),
        Reply::ok("play-token"),
        Reply::ok(""),
        Reply::ok(""),
        Reply::ok(""),
    ]);
    let client = TicsClient::builder()
        .transport(Arc::new(HttpTransport::new(options(2048)).unwrap()))
        .endpoint(EndpointConfig::new(addr, "/t/"))
        .build()
        .unwrap();

    client.open_metric_session("p1").unwrap();
    client.start_play_session().unwrap();
    client
        .log_event(&EventRecord::with_magnitude(EventType::PlayerShoot, 1.0))
        .unwrap();
    client.stop_play_session().unwrap();
    client.close_metric_session().unwrap();

    let lines = server.join().unwrap();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "GET /t/openMetricSession.php?id=p1 HTTP/1.1");
    assert_eq!(
        lines[1],
        "GET /t/startPlaySession.php?metric-token HTTP/1.1"
    );
    assert!(lines[2].starts_with("GET /t/logEvent.php?tick="));
    assert!(lines[2].contains("&et=2&est=0&x=0&y=0&z=0&m=1 "));
    assert_eq!(
        lines[4],
        "GET /t/closeMetricSession.php?metric-token HTTP/1.1"
    );
}

#[test]
fn test_server_error_on_open_surfaces_code() {
    let (addr, server) = serve(vec![Reply::status("503 Service Unavailable")]);
    let client = TicsClient::builder()
        .transport(Arc::new(HttpTransport::new(options(2048)).unwrap()))
        .endpoint(EndpointConfig::new(addr, "/t/"))
        .build()
        .unwrap();

    let err = client.open_metric_session("p1").unwrap_err();
    assert!(matches!(err, TicsError::Transport(_)));
    assert_eq!(err.diagnostic_code(), Some(503));
    server.join().unwrap();
}
