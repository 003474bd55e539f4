//! Property-based tests for the wire encoding and session guards

use proptest::prelude::*;
use std::sync::Arc;
use webtics::wire::{decode_event, encode_event, EncodedPayload};
use webtics::{EndpointConfig, EventRecord, MemoryTransport, OperationKind, TicsClient};

fn record_strategy() -> impl Strategy<Value = EventRecord> {
    (
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL,
        prop::option::of(".*"),
    )
        .prop_map(|(event_type, subtype, x, y, z, magnitude, data)| {
            EventRecord::full(event_type, subtype, x, y, z, magnitude, data)
        })
}

/// decode(encode(r)) == r, also after the query has been rendered and re-parsed.
#[test]
fn test_event_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<u64>(), record_strategy()), |(tick, record)| {
            let payload = encode_event(tick, &record);
            let (decoded_tick, decoded) = decode_event(&payload).unwrap();
            prop_assert_eq!(decoded_tick, tick);
            prop_assert_eq!(&decoded, &record);

            let reparsed = EncodedPayload::parse(&payload.to_query());
            let (_, decoded) = decode_event(&reparsed).unwrap();
            prop_assert_eq!(&decoded, &record);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_empty_data_round_trips() {
    let record = EventRecord::full(3, 1, -2, 0, 7, 0.25, Some(String::new()));
    let payload = encode_event(9, &record);
    assert_eq!(payload.get("data"), None);
    let (tick, decoded) = decode_event(&payload).unwrap();
    assert_eq!(tick, 9);
    assert_eq!(decoded, record);
}

/// Encoded queries never contain characters that would split fields.
#[test]
fn test_encoded_values_are_query_safe() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&record_strategy(), |record| {
            let payload = encode_event(0, &record);
            for (_, value) in payload.fields() {
                prop_assert!(!value.contains('&'));
                prop_assert!(!value.contains('='));
                prop_assert!(!value.contains(' '));
                prop_assert!(!value.contains('#'));
            }
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Whatever sequence of calls is made, log requests only go out inside a play session and
    /// the transport sees at most one open per metric session.
    #[test]
    fn test_guards_hold_for_any_call_sequence(calls in prop::collection::vec(0u8..5, 0..40)) {
        let transport = Arc::new(MemoryTransport::new());
        let client = TicsClient::builder()
            .transport(transport.clone())
            .endpoint(EndpointConfig::new("localhost", "/t/"))
            .build()
            .unwrap();

        for call in calls {
            let _ = match call {
                0 => client.open_metric_session("p").map(|o| o.is_completed()),
                1 => client.start_play_session().map(|o| o.is_completed()),
                2 => client.log_event(&EventRecord::new(1)).map(|o| o.is_completed()),
                3 => client.stop_play_session().map(|o| o.is_completed()),
                _ => client.close_metric_session().map(|o| o.is_completed()),
            };
        }

        let mut open = false;
        let mut playing = false;
        for kind in transport.kinds() {
            match kind {
                OperationKind::OpenMetricSession => {
                    prop_assert!(!open);
                    open = true;
                }
                OperationKind::StartPlaySession => {
                    prop_assert!(open && !playing);
                    playing = true;
                }
                OperationKind::LogEvent => prop_assert!(playing),
                OperationKind::StopPlaySession => {
                    prop_assert!(playing);
                    playing = false;
                }
                OperationKind::CloseMetricSession => {
                    prop_assert!(open && !playing);
                    open = false;
                }
                _ => {}
            }
        }
    }
}
