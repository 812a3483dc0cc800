/*!
 * Telemetry Event Record
 * Common fields carried by every event the sensor emits
 */

use crate::core::types::{Cpu, MonoNanos, Pid, SequenceNumber};
use crate::process::{ContainerInfo, Credentials};
use serde::{Deserialize, Serialize};

/// Implemented by every concrete event type the sensor produces
pub trait TelemetryEvent {
    /// Identity and origin fields shared by all event types
    fn common(&self) -> &TelemetryEventData;
}

/// Identity and origin of one observed occurrence
///
/// Built by value on the sampling thread and handed off whole; nothing in
/// this crate mutates a record after returning it. Unresolved origin is a
/// normal state: pid/tgid stay zero, `process_id` stays `None` and the
/// container stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryEventData {
    /// SHA-256 over (sensor id, sequence number, monotime), lowercase hex
    pub event_id: String,
    pub sensor_id: String,
    /// Nanoseconds since the sensor's boot reference
    pub monotime_nanos: MonoNanos,
    pub sequence_number: SequenceNumber,

    /// `None` when no task was resolved; `Some("")` when the resolved task
    /// had no correlation id
    pub process_id: Option<String>,
    pub pid: Pid,
    pub tgid: Pid,
    pub cpu: Cpu,
    pub credentials: Option<Credentials>,

    pub container: ContainerInfo,
}

impl TelemetryEventData {
    #[inline]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// True if the sample was attributed to a task
    #[inline]
    pub fn has_process(&self) -> bool {
        self.process_id.is_some()
    }
}

impl TelemetryEvent for TelemetryEventData {
    fn common(&self) -> &TelemetryEventData {
        self
    }
}
