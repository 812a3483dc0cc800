/*!
 * Monotonic Clocks
 * Clock sources for sensor-relative event timestamps
 */

use crate::core::types::MonoNanos;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::warn;

/// Source of monotonic nanoseconds
pub trait MonotonicClock: Send + Sync + fmt::Debug {
    /// Current reading in nanoseconds; never moves backward
    fn now_nanos(&self) -> MonoNanos;
}

/// `CLOCK_MONOTONIC_RAW`, the clock perf stamps samples with
///
/// The source is picked once at construction. Without the raw clock every
/// reading comes from a process-local `Instant` anchor; the two are never
/// mixed, since their epochs differ.
#[derive(Debug)]
pub struct RawMonotonicClock {
    source: ClockSource,
    last: AtomicI64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockSource {
    Raw,
    Instant,
}

impl RawMonotonicClock {
    pub fn new() -> Self {
        let source = if read_raw().is_some() {
            ClockSource::Raw
        } else {
            warn!("CLOCK_MONOTONIC_RAW unavailable, using process-local monotonic clock");
            ClockSource::Instant
        };
        Self::with_source(source)
    }

    fn with_source(source: ClockSource) -> Self {
        Self {
            source,
            last: AtomicI64::new(0),
        }
    }

    /// True if readings come from `CLOCK_MONOTONIC_RAW`
    pub fn is_raw(&self) -> bool {
        self.source == ClockSource::Raw
    }

    /// A failed raw read repeats the last good reading
    fn settle(&self, reading: Option<MonoNanos>) -> MonoNanos {
        match reading {
            Some(nanos) => {
                self.last.store(nanos, Ordering::Relaxed);
                nanos
            }
            None => self.last.load(Ordering::Relaxed),
        }
    }
}

impl Default for RawMonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for RawMonotonicClock {
    fn now_nanos(&self) -> MonoNanos {
        match self.source {
            ClockSource::Raw => self.settle(read_raw()),
            ClockSource::Instant => instant_nanos(),
        }
    }
}

#[cfg(target_os = "linux")]
fn read_raw() -> Option<MonoNanos> {
    use nix::time::{clock_gettime, ClockId};

    clock_gettime(ClockId::CLOCK_MONOTONIC_RAW).ok().map(|ts| {
        (ts.tv_sec() as MonoNanos)
            .wrapping_mul(1_000_000_000)
            .wrapping_add(ts.tv_nsec() as MonoNanos)
    })
}

#[cfg(not(target_os = "linux"))]
fn read_raw() -> Option<MonoNanos> {
    None
}

fn instant_nanos() -> MonoNanos {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(Instant::now);
    anchor.elapsed().as_nanos() as MonoNanos
}

/// Manually driven clock for tests and replay
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicI64,
}

impl ManualClock {
    pub fn new(start: MonoNanos) -> Self {
        Self {
            nanos: AtomicI64::new(start),
        }
    }

    pub fn set(&self, nanos: MonoNanos) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: MonoNanos) {
        self.nanos.fetch_add(delta, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> MonoNanos {
        self.nanos.load(Ordering::SeqCst)
    }
}
