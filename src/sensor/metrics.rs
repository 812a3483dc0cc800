/*!
 * Sensor Metrics
 * Lock-free event counters owned by a sensor instance
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-sensor counters
///
/// # Performance
/// - Cache-line aligned; every sampling thread bumps `events`
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct SensorMetrics {
    events: AtomicU64,
    suppressed: AtomicU64,
    unresolved: AtomicU64,
}

impl SensorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_event(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_unresolved(&self) {
        self.unresolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Events stamped by the identity assigner
    pub fn events(&self) -> u64 {
        self.events.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events: self.events.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the sensor counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Events stamped with an identity
    pub events: u64,
    /// Samples dropped because they came from the sensor itself
    pub suppressed: u64,
    /// Samples no task could be resolved for
    pub unresolved: u64,
}
