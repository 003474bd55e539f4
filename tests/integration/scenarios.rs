//! End-to-end request sequences as a backend would see them

use super::support::recording_client;
use webtics::wire::{decode_event, EncodedPayload};
use webtics::{ClientEvent, EventRecord, EventType, OperationKind};

#[test]
fn test_shoot_event_scenario() {
    let (client, transport) = recording_client();

    client.open_metric_session("p1").unwrap();
    client.start_play_session().unwrap();
    let tick = client
        .log_event(&EventRecord::with_magnitude(EventType::PlayerShoot, 1.0))
        .unwrap()
        .completed()
        .unwrap();
    client.stop_play_session().unwrap();
    client.close_metric_session().unwrap();

    let requests = transport.requests();
    let lines: Vec<String> = requests.iter().map(|r| r.path_and_query()).collect();
    assert_eq!(lines[0], "/t/openMetricSession.php?id=p1");
    assert_eq!(lines[1], "/t/startPlaySession.php?metric-1");
    assert!(lines[2].starts_with("/t/logEvent.php?tick="));
    assert!(lines[2].ends_with("&et=2&est=0&x=0&y=0&z=0&m=1"));
    assert_eq!(lines[3], "/t/stopPlaySession.php?metric-1");
    assert_eq!(lines[4], "/t/closeMetricSession.php?metric-1");

    let sent_tick: u64 = requests[2].payload.get("tick").unwrap().parse().unwrap();
    assert_eq!(sent_tick, tick);
    assert!(requests.iter().all(|r| r.host == "localhost"));
}

#[test]
fn test_logged_payload_decodes_to_the_record() {
    let (client, transport) = recording_client();
    client.open_metric_session("p1").unwrap();
    client.start_play_session().unwrap();

    let record = EventRecord::full(
        EventType::WaypointReached,
        2,
        -10,
        4,
        7,
        3.75,
        Some("gate & door".to_string()),
    );
    client.log_event(&record).unwrap();

    let sent = transport.last().unwrap();
    let reparsed = EncodedPayload::parse(&sent.payload.to_query());
    let (_, decoded) = decode_event(&reparsed).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(sent.payload.get("data"), Some("gate%20%26%20door"));
}

#[test]
fn test_uncatalogued_codes_are_forwarded() {
    let (client, transport) = recording_client();
    client.open_metric_session("p1").unwrap();
    client.start_play_session().unwrap();

    client.log_event(&EventRecord::new(9001).subtype(-1)).unwrap();
    let sent = transport.last().unwrap();
    assert_eq!(sent.payload.get("et"), Some("9001"));
    assert_eq!(sent.payload.get("est"), Some("-1"));
}

#[test]
fn test_subscribers_see_the_session_story() {
    let (client, _transport) = recording_client();
    let events = client.subscribe();

    client.open_metric_session("p1").unwrap();
    client.start_play_session().unwrap();
    client.log_event(&EventRecord::new(EventType::LevelComplete)).unwrap();
    client.close_metric_session().unwrap();
    client.log_event(&EventRecord::new(EventType::LevelComplete)).unwrap();

    let kinds: Vec<&'static str> = events
        .try_iter()
        .map(|event| match event {
            ClientEvent::MetricSessionOpened { .. } => "opened",
            ClientEvent::MetricSessionClosed => "closed",
            ClientEvent::PlaySessionStarted => "started",
            ClientEvent::PlaySessionStopped => "stopped",
            ClientEvent::EventLogged { .. } => "logged",
            ClientEvent::CatalogRegistered { .. } => "registered",
            ClientEvent::Dropped { .. } => "dropped",
            ClientEvent::Failed { .. } => "failed",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["opened", "started", "logged", "stopped", "closed", "dropped"]
    );
}

#[test]
fn test_failures_are_broadcast() {
    let (client, transport) = recording_client();
    let events = client.subscribe();
    transport.reply_empty(OperationKind::OpenMetricSession);

    assert!(client.open_metric_session("p1").is_err());
    match events.try_recv().unwrap() {
        ClientEvent::Failed { operation, error } => {
            assert_eq!(operation, OperationKind::OpenMetricSession);
            assert!(error.contains("Zero length response"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}
