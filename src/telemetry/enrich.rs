/*!
 * Sample Enrichment
 * Attribute a raw sample to its task, process and container
 *
 * Enrichment is best effort and never fails: a directory miss leaves the
 * origin fields empty and the event is still produced.
 */

use super::event::TelemetryEventData;
use super::sample::{RawSample, SampleData, SampleDecision};
use crate::process::{ContainerInfo, Task};
use crate::sensor::Sensor;
use std::sync::Arc;
use tracing::trace;

impl TelemetryEventData {
    /// Build a record for a kernel sample
    ///
    /// Returns `Suppress` only when the sample's leader task is known to be
    /// the sensor itself. Samples with no resolvable leader are kept.
    ///
    /// The event id is hashed over the sample's kernel timestamp, never over
    /// a clock read, so `event_id` always matches the record's own fields.
    /// Ids therefore differ from schemes that hash a provisional clock read
    /// and overwrite the timestamp afterwards.
    pub fn init_with_sample(
        sensor: &Sensor,
        sample: &RawSample,
        data: &SampleData,
    ) -> (Self, SampleDecision) {
        let (task, leader) = resolve_task(sensor, data);

        // The kernel timestamp says when the event happened; it replaces
        // the clock read the identity would otherwise use.
        let monotime_nanos = (sample.time as i64).wrapping_sub(sensor.boot_monotime_nanos());
        let mut event = Self::stamped(sensor, monotime_nanos);
        event.cpu = sample.cpu;

        match &task {
            Some(task) => {
                event.process_id = Some(task.process_id.clone());
                event.pid = task.pid;
                event.tgid = task.tgid;
                event.credentials = task.creds;
            }
            None => {
                sensor.metrics().record_unresolved();
                trace!(
                    cpu = sample.cpu,
                    common_pid = ?data.common_pid,
                    "sample origin unresolved"
                );
            }
        }

        if let Some(leader) = &leader {
            event.container = sensor
                .process_directory()
                .lookup_container_info(leader)
                .unwrap_or_else(|| ContainerInfo::with_id(leader.container_id.clone()));
        }

        let decision = match leader {
            Some(leader) if leader.is_sensor() => SampleDecision::Suppress,
            _ => SampleDecision::Keep,
        };

        if decision == SampleDecision::Suppress {
            sensor.metrics().record_suppressed();
            trace!(
                sequence_number = event.sequence_number,
                pid = event.pid,
                "suppressed sensor self-event"
            );
        }

        (event, decision)
    }
}

/// Pick the task behind a sample
///
/// A task handed over by the producer wins and skips the directory lookup.
/// Otherwise `common_pid` is looked up.
fn resolve_task(sensor: &Sensor, data: &SampleData) -> (Option<Arc<Task>>, Option<Arc<Task>>) {
    if let Some(task) = &data.task {
        return (Some(Arc::clone(task)), task.leader());
    }

    match data.common_pid {
        Some(pid) => sensor.process_directory().lookup_task_and_leader(pid),
        None => (None, None),
    }
}
