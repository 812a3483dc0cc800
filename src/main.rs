/*!
 * Sensor Events - Demo Driver
 *
 * Replays synthetic kernel samples through the enricher:
 * - one sampling thread per CPU
 * - a process cache holding this process (flagged as the sensor) plus a
 *   few containerized tasks
 * - some samples reference pids the cache has never seen
 */

use miette::{IntoDiagnostic, Result};
use sensor_events::process::{ContainerRuntime, ContainerState};
use sensor_events::{
    init_tracing, ContainerInfo, Credentials, ProcessCache, RawSample, SampleData, Sensor,
    SensorConfig, Task, TelemetryEventData,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Samples generated per simulated CPU
const SAMPLES_PER_CPU: u64 = 10_000;

/// Pid the cache never learns about
const UNKNOWN_PID: i32 = 65_000;

fn main() -> Result<()> {
    let config = SensorConfig::load()?;
    init_tracing(&config);

    info!("Sensor events demo starting...");

    let cache = ProcessCache::new();
    let own_pid = std::process::id() as i32;
    cache.insert_task(
        Task::new(own_pid, own_pid, format!("sensor-{own_pid}"))
            .with_creds(Credentials::uniform(0, 0))
            .as_sensor(),
    );
    seed_workload(&cache);
    info!(tasks = cache.len(), "process cache seeded");

    let sensor = Arc::new(
        Sensor::builder()
            .with_config(&config)
            .with_process_directory(Arc::new(cache.clone()))
            .build(),
    );

    let cpus = std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1);
    let pids = [own_pid, 2000, 2001, 3000, UNKNOWN_PID];
    let kept = AtomicU64::new(0);
    let suppressed = AtomicU64::new(0);

    info!(cpus, samples_per_cpu = SAMPLES_PER_CPU, "starting sampling threads");

    std::thread::scope(|scope| {
        for cpu in 0..cpus {
            let sensor = Arc::clone(&sensor);
            let kept = &kept;
            let suppressed = &suppressed;

            scope.spawn(move || {
                for i in 0..SAMPLES_PER_CPU {
                    let pid = pids[((i + cpu as u64) % pids.len() as u64) as usize];
                    let sample = RawSample::new(sensor.clock().now_nanos() as u64, cpu);
                    let data = SampleData::new().with_common_pid(pid);

                    let (_event, decision) =
                        TelemetryEventData::init_with_sample(&sensor, &sample, &data);
                    if decision.is_keep() {
                        kept.fetch_add(1, Ordering::Relaxed);
                    } else {
                        suppressed.fetch_add(1, Ordering::Relaxed);
                    }
                }
                debug!(cpu, "sampling thread finished");
            });
        }
    });

    let (example, _) = TelemetryEventData::init_with_sample(
        &sensor,
        &RawSample::new(sensor.clock().now_nanos() as u64, 0),
        &SampleData::new().with_common_pid(2000),
    );
    let example_json = serde_json::to_string(&example).into_diagnostic()?;
    info!(event = %example_json, "example event");

    let snapshot = sensor.metrics().snapshot();
    info!(
        kept = kept.load(Ordering::Relaxed),
        suppressed = suppressed.load(Ordering::Relaxed),
        events = snapshot.events,
        unresolved = snapshot.unresolved,
        "replay complete"
    );

    Ok(())
}

/// One container with discovered metadata (leader plus a thread) and one
/// known only by its id
fn seed_workload(cache: &ProcessCache) {
    cache.set_container_info(ContainerInfo {
        name: "nginx".to_string(),
        image_id: "sha256:4f3c".to_string(),
        image_name: "nginx:1.25".to_string(),
        pid: 2000,
        runtime: ContainerRuntime::Docker,
        state: ContainerState::Running,
        ..ContainerInfo::with_id("9a1f2c")
    });

    cache.insert_task(
        Task::new(2000, 2000, "proc-2000")
            .with_container_id("9a1f2c")
            .with_creds(Credentials::uniform(101, 101)),
    );
    cache.insert_task(Task::new(2001, 2000, "proc-2000").with_container_id("9a1f2c"));
    cache.insert_task(
        Task::new(3000, 3000, "proc-3000")
            .with_container_id("77be01")
            .with_creds(Credentials::uniform(1000, 1000)),
    );
}
