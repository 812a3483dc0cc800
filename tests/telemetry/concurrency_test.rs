/*!
 * Concurrent Sampling Tests
 */

use sensor_events::{ProcessCache, RawSample, SampleData, Sensor, Task, TelemetryEventData};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: u64 = 8;
const PER_THREAD: u64 = 2_000;

#[test]
fn test_sequence_uniqueness_across_threads() {
    let sensor = Arc::new(Sensor::builder().with_id("sensor-1").build());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let sensor = Arc::clone(&sensor);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| TelemetryEventData::init(&sensor).sequence_number)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for seq in handle.join().unwrap() {
            assert!(seen.insert(seq), "duplicate sequence number {seq}");
        }
    }

    let expected: HashSet<u64> = (1..=THREADS * PER_THREAD).collect();
    assert_eq!(seen, expected);
    assert_eq!(sensor.metrics().events(), THREADS * PER_THREAD);
}

#[test]
fn test_concurrent_enrichment_per_cpu() {
    let cache = ProcessCache::new();
    cache.insert_task(Task::new(1, 1, "sensor").as_sensor());
    cache.insert_task(Task::new(2, 2, "workload"));
    let sensor = Arc::new(
        Sensor::builder()
            .with_id("sensor-1")
            .with_boot_monotime_nanos(0)
            .with_process_directory(Arc::new(cache.clone()))
            .build(),
    );

    let results: Vec<(u64, u64, HashSet<String>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS as u32)
            .map(|cpu| {
                let sensor = Arc::clone(&sensor);
                scope.spawn(move || {
                    let mut kept = 0;
                    let mut suppressed = 0;
                    let mut ids = HashSet::new();
                    for i in 0..PER_THREAD {
                        // Alternate between the sensor and the workload
                        let data = SampleData::new().with_common_pid(1 + (i % 2) as i32);
                        let (event, decision) = TelemetryEventData::init_with_sample(
                            &sensor,
                            &RawSample::new(i, cpu),
                            &data,
                        );
                        assert_eq!(event.cpu, cpu);
                        if decision.is_keep() {
                            kept += 1;
                        } else {
                            suppressed += 1;
                        }
                        ids.insert(event.event_id);
                    }
                    (kept, suppressed, ids)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut all_ids = HashSet::new();
    let (mut kept, mut suppressed) = (0, 0);
    for (k, s, ids) in results {
        kept += k;
        suppressed += s;
        all_ids.extend(ids);
    }

    assert_eq!(kept, THREADS * PER_THREAD / 2);
    assert_eq!(suppressed, THREADS * PER_THREAD / 2);
    // Same timestamps on every CPU, yet sequence numbers keep ids distinct
    assert_eq!(all_ids.len() as u64, THREADS * PER_THREAD);
    assert_eq!(sensor.metrics().snapshot().suppressed, suppressed);
}

#[test]
fn test_sensors_do_not_share_counters() {
    let a = Arc::new(Sensor::builder().with_id("a").build());
    let b = Arc::new(Sensor::builder().with_id("b").build());

    thread::scope(|scope| {
        for sensor in [&a, &b] {
            scope.spawn(move || {
                for _ in 0..PER_THREAD {
                    TelemetryEventData::init(sensor);
                }
            });
        }
    });

    assert_eq!(a.metrics().events(), PER_THREAD);
    assert_eq!(b.metrics().events(), PER_THREAD);
    assert_eq!(TelemetryEventData::init(&a).sequence_number, PER_THREAD + 1);
}
