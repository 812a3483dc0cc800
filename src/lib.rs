/*!
 * Sensor Events Library
 * Identity assignment and origin enrichment for kernel telemetry events
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod sensor;
pub mod telemetry;

// Re-exports
pub use crate::core::errors::{ConfigError, ConfigResult};
pub use monitoring::init_tracing;
pub use process::{ContainerInfo, Credentials, ProcessCache, ProcessDirectory, Task};
pub use sensor::{Sensor, SensorBuilder, SensorConfig};
pub use telemetry::{
    event_id, RawSample, SampleData, SampleDecision, TelemetryEvent, TelemetryEventData,
};
