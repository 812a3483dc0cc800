/*!
 * Raw Samples
 * Typed ingestion boundary for kernel trace samples
 *
 * Trace events arrive with a loosely typed field bag. It is converted once
 * into `SampleData` so enrichment never probes field types itself.
 */

use crate::core::types::{Cpu, Pid};
use crate::process::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Trace-event field carrying the pid of the task that hit the probe.
/// Unlike the sample header pid it stays valid across pid namespaces.
pub const COMMON_PID_FIELD: &str = "common_pid";

/// Sample header as delivered by the kernel ring buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    /// Kernel timestamp on the raw monotonic clock
    pub time: u64,
    pub cpu: Cpu,
    /// Header pid/tid, carried through for consumers of the raw sample.
    /// Zero when sensor and target sit in different pid namespaces, so
    /// attribution goes through `common_pid` instead.
    pub pid: u32,
    pub tid: u32,
}

impl RawSample {
    pub const fn new(time: u64, cpu: Cpu) -> Self {
        Self {
            time,
            cpu,
            pid: 0,
            tid: 0,
        }
    }
}

/// Decoded trace-event field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum TraceValue {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    Str(String),
    Bytes(Vec<u8>),
}

impl TraceValue {
    /// Integer value if it fits a pid
    pub fn as_pid(&self) -> Option<Pid> {
        match *self {
            TraceValue::I32(v) => Some(v),
            TraceValue::I64(v) => Pid::try_from(v).ok(),
            TraceValue::U32(v) => Pid::try_from(v).ok(),
            TraceValue::U64(v) => Pid::try_from(v).ok(),
            TraceValue::Str(_) | TraceValue::Bytes(_) => None,
        }
    }
}

/// Origin hints attached to a sample
#[derive(Debug, Clone, Default)]
pub struct SampleData {
    /// Task already resolved by the producer (process lifecycle probes)
    pub task: Option<Arc<Task>>,
    /// Non-zero `common_pid` from the trace event
    pub common_pid: Option<Pid>,
}

impl SampleData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, task: Arc<Task>) -> Self {
        self.task = Some(task);
        self
    }

    /// Zero means "no pid" and is dropped
    pub fn with_common_pid(mut self, pid: Pid) -> Self {
        self.common_pid = (pid != 0).then_some(pid);
        self
    }

    /// Extract origin hints from a decoded trace-event field bag
    pub fn from_trace_fields<S: BuildHasher>(fields: &HashMap<String, TraceValue, S>) -> Self {
        let common_pid = fields
            .get(COMMON_PID_FIELD)
            .and_then(TraceValue::as_pid)
            .filter(|&pid| pid != 0);

        Self {
            task: None,
            common_pid,
        }
    }
}

/// Whether an enriched event should be handed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDecision {
    Keep,
    /// Caused by the sensor's own activity
    Suppress,
}

impl SampleDecision {
    #[inline]
    pub fn is_keep(self) -> bool {
        matches!(self, SampleDecision::Keep)
    }
}
