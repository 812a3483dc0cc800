/*!
 * Telemetry Module
 * Event identity assignment and sample enrichment
 */

mod enrich;
mod event;
mod identity;
mod sample;

pub use event::{TelemetryEvent, TelemetryEventData};
pub use identity::{event_id, EVENT_ID_LEN};
pub use sample::{RawSample, SampleData, SampleDecision, TraceValue, COMMON_PID_FIELD};
