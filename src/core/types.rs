/*!
 * Core Types
 * Common scalar types shared by the sensor, process and telemetry layers
 */

/// OS process/thread identifier as reported by the kernel (zero when unknown)
pub type Pid = i32;

/// CPU core index that captured a sample
pub type Cpu = u32;

/// Nanoseconds on a monotonic clock, possibly relative to a reference point
pub type MonoNanos = i64;

/// Per-sensor event sequence number
pub type SequenceNumber = u64;
