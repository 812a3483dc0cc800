/*!
 * Event Identity
 * Sensor id, relative monotime, sequence number and content-hash event id
 *
 * The id layout is fixed so independent implementations agree:
 * SHA-256( sensor id bytes || seq as u64 LE || monotime as i64 LE ),
 * rendered as 64 lowercase hex characters.
 */

use super::event::TelemetryEventData;
use crate::core::types::{MonoNanos, SequenceNumber};
use crate::sensor::Sensor;
use sha2::{Digest, Sha256};

/// Length of a rendered event id
pub const EVENT_ID_LEN: usize = 64;

/// Derive the event id for an identity triple
///
/// Pure and infallible: any sensor id (including empty) and any sequence
/// number (including zero) hash fine.
pub fn event_id(
    sensor_id: &str,
    sequence_number: SequenceNumber,
    monotime_nanos: MonoNanos,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sensor_id.as_bytes());
    hasher.update(sequence_number.to_le_bytes());
    hasher.update(monotime_nanos.to_le_bytes());
    hex::encode(hasher.finalize())
}

impl TelemetryEventData {
    /// New record with the common sensor fields populated
    ///
    /// Monotime is read from the sensor clock relative to its boot reference.
    pub fn init(sensor: &Sensor) -> Self {
        Self::stamped(sensor, sensor.monotime_since_boot())
    }

    /// Record stamped with an explicit sensor-relative monotime
    ///
    /// Takes the next sequence number and bumps the event counter.
    pub(crate) fn stamped(sensor: &Sensor, monotime_nanos: MonoNanos) -> Self {
        let sequence_number = sensor.next_sequence_number();
        sensor.metrics().record_event();

        Self {
            event_id: event_id(sensor.id(), sequence_number, monotime_nanos),
            sensor_id: sensor.id().to_string(),
            monotime_nanos,
            sequence_number,
            ..Self::default()
        }
    }

    /// True if `event_id` matches the record's own identity fields
    pub fn is_identity_consistent(&self) -> bool {
        self.event_id == event_id(&self.sensor_id, self.sequence_number, self.monotime_nanos)
    }
}
