/*!
 * Sensor Context
 * Identity, time reference and shared counters of one sensor instance
 *
 * All mutable state lives on the `Sensor` value rather than in globals, so
 * several sensors can run side by side without sharing sequence numbers.
 */

mod clock;
mod config;
mod metrics;

pub use clock::{ManualClock, MonotonicClock, RawMonotonicClock};
pub use config::{SensorConfig, ENV_CONFIG, ENV_LOG, ENV_SENSOR_ID, ENV_TRACE_JSON};
pub use metrics::{MetricsSnapshot, SensorMetrics};

use crate::core::types::{MonoNanos, SequenceNumber};
use crate::process::{ProcessCache, ProcessDirectory};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// A running sensor instance
///
/// Shared across sampling threads behind an `Arc`.
pub struct Sensor {
    id: String,
    boot_monotime_nanos: MonoNanos,
    clock: Arc<dyn MonotonicClock>,
    sequence_number: AtomicU64,
    metrics: SensorMetrics,
    process_directory: Arc<dyn ProcessDirectory>,
}

impl Sensor {
    pub fn builder() -> SensorBuilder {
        SensorBuilder::new()
    }

    /// Sensor on the raw monotonic clock with an empty process cache
    pub fn from_config(config: &SensorConfig) -> Self {
        Self::builder().with_config(config).build()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Monotonic clock reading taken when the sensor started
    #[inline]
    pub fn boot_monotime_nanos(&self) -> MonoNanos {
        self.boot_monotime_nanos
    }

    #[inline]
    pub fn clock(&self) -> &dyn MonotonicClock {
        self.clock.as_ref()
    }

    /// Nanoseconds elapsed since the boot reference
    #[inline]
    pub fn monotime_since_boot(&self) -> MonoNanos {
        self.clock.now_nanos().wrapping_sub(self.boot_monotime_nanos)
    }

    /// Issue the next sequence number (first is 1, wraps at 2^64)
    #[inline]
    pub fn next_sequence_number(&self) -> SequenceNumber {
        self.sequence_number
            .fetch_add(1, Ordering::Relaxed)
            .wrapping_add(1)
    }

    #[inline]
    pub fn metrics(&self) -> &SensorMetrics {
        &self.metrics
    }

    #[inline]
    pub fn process_directory(&self) -> &dyn ProcessDirectory {
        self.process_directory.as_ref()
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("id", &self.id)
            .field("boot_monotime_nanos", &self.boot_monotime_nanos)
            .field("clock", &self.clock)
            .field("sequence_number", &self.sequence_number.load(Ordering::Relaxed))
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

/// Builder for Sensor
#[derive(Default)]
pub struct SensorBuilder {
    id: Option<String>,
    clock: Option<Arc<dyn MonotonicClock>>,
    boot_monotime_nanos: Option<MonoNanos>,
    initial_sequence_number: SequenceNumber,
    process_directory: Option<Arc<dyn ProcessDirectory>>,
}

impl SensorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Apply the configured sensor id, if any
    pub fn with_config(mut self, config: &SensorConfig) -> Self {
        if let Some(id) = &config.sensor_id {
            self.id = Some(id.clone());
        }
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn MonotonicClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Pin the boot reference instead of reading the clock at build time
    pub fn with_boot_monotime_nanos(mut self, nanos: MonoNanos) -> Self {
        self.boot_monotime_nanos = Some(nanos);
        self
    }

    /// Resume numbering after `last`; the next issued number is `last + 1`
    pub fn with_last_sequence_number(mut self, last: SequenceNumber) -> Self {
        self.initial_sequence_number = last;
        self
    }

    pub fn with_process_directory(mut self, directory: Arc<dyn ProcessDirectory>) -> Self {
        self.process_directory = Some(directory);
        self
    }

    pub fn build(self) -> Sensor {
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(RawMonotonicClock::new()));
        let boot_monotime_nanos = self
            .boot_monotime_nanos
            .unwrap_or_else(|| clock.now_nanos());
        let process_directory = self
            .process_directory
            .unwrap_or_else(|| Arc::new(ProcessCache::new()));

        info!(
            sensor_id = %id,
            boot_monotime_nanos,
            "sensor initialized"
        );

        Sensor {
            id,
            boot_monotime_nanos,
            clock,
            sequence_number: AtomicU64::new(self.initial_sequence_number),
            metrics: SensorMetrics::new(),
            process_directory,
        }
    }
}
