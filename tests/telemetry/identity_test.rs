/*!
 * Event Identity Tests
 */

use proptest::prelude::*;
use sensor_events::sensor::ManualClock;
use sensor_events::telemetry::{event_id, EVENT_ID_LEN};
use sensor_events::{Sensor, TelemetryEventData};
use std::sync::Arc;

/// sha256("sensor-1" || le_u64(42) || le_i64(1000))
const SENSOR_1_SEQ_42_T_1000: &str =
    "4a7787497b41111af3c6c035d34cf80100764ef27d0f617edf7bc4794889aeef";

#[test]
fn test_worked_example() {
    let first = event_id("sensor-1", 42, 1000);
    let second = event_id("sensor-1", 42, 1000);

    assert_eq!(first, SENSOR_1_SEQ_42_T_1000);
    assert_eq!(first, second);
}

#[test]
fn test_each_input_changes_id() {
    let base = event_id("sensor-1", 42, 1000);

    let other_sensor = event_id("sensor-2", 42, 1000);
    let other_seq = event_id("sensor-1", 43, 1000);
    let other_time = event_id("sensor-1", 42, 1001);
    let negative_time = event_id("sensor-1", 42, -1000);

    assert_eq!(
        other_sensor,
        "b12e5d2fc327a2a308244e2a96b80ad61a61cba94a6d5786fa104ae5bcaabb2a"
    );
    assert_eq!(
        other_seq,
        "41c71451d2e61124a2cb017f12d33983ea14e5df1cd3405e20822dc35511f8b8"
    );
    assert_eq!(
        other_time,
        "bf637e7efaccb902ed86766cd5a480c62a648123b9f2b21fb2910e7868954212"
    );
    assert_eq!(
        negative_time,
        "bf3f07b697fe569bb93c7ef02cbc23900d6c9a3cfb0c96151a9dab450be915ce"
    );

    for changed in [&other_sensor, &other_seq, &other_time, &negative_time] {
        assert_ne!(&base, changed);
    }
}

#[test]
fn test_init_matches_pure_function() {
    let clock = Arc::new(ManualClock::new(0));
    let sensor = Sensor::builder()
        .with_id("sensor-1")
        .with_clock(clock.clone())
        .with_last_sequence_number(41)
        .build();
    clock.set(1000);

    let event = TelemetryEventData::init(&sensor);
    assert_eq!(event.sequence_number, 42);
    assert_eq!(event.monotime_nanos, 1000);
    assert_eq!(event.event_id, SENSOR_1_SEQ_42_T_1000);
}

#[test]
fn test_init_sequence_strictly_increasing() {
    let sensor = Sensor::builder().with_id("sensor-1").build();

    let numbers: Vec<u64> = (0..100)
        .map(|_| TelemetryEventData::init(&sensor).sequence_number)
        .collect();

    assert_eq!(numbers, (1..=100).collect::<Vec<_>>());
    assert_eq!(sensor.metrics().events(), 100);
}

#[test]
fn test_empty_sensor_id_is_legal() {
    let sensor = Sensor::builder().with_id("").build();
    let event = TelemetryEventData::init(&sensor);

    assert_eq!(event.sensor_id, "");
    assert_eq!(event.event_id.len(), EVENT_ID_LEN);
}

proptest! {
    #[test]
    fn prop_event_id_is_lowercase_hex(id in ".{0,64}", seq: u64, t: i64) {
        let rendered = event_id(&id, seq, t);
        prop_assert_eq!(rendered.len(), EVENT_ID_LEN);
        prop_assert!(rendered.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn prop_event_id_deterministic(id in "[a-z0-9-]{0,32}", seq: u64, t: i64) {
        prop_assert_eq!(event_id(&id, seq, t), event_id(&id, seq, t));
    }

    #[test]
    fn prop_sequence_number_sensitive(seq in 0u64..u64::MAX, t: i64) {
        prop_assert_ne!(event_id("sensor-1", seq, t), event_id("sensor-1", seq + 1, t));
    }
}
