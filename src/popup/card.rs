use crate::api::models::{AllSensors, FieldValue, SensorReading};

/// Shown in place of a reading the snapshot does not have.
pub const PLACEHOLDER: &str = "-";

/// Latest value for a named field, or `None` when the room has no reading
/// for it. Readings arrive newest-first, so the first match wins.
#[must_use]
pub fn get_latest_value<'a>(readings: &'a [SensorReading], field: &str) -> Option<&'a FieldValue> {
    readings.iter().find(|r| r.field == field).map(|r| &r.value)
}

/// Formatted temperature and humidity for one room, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCard {
    pub temperature: String,
    pub humidity: String,
}

impl RoomCard {
    /// Build the card from a room's readings. Absent fields format as the
    /// placeholder; a present zero formats as a value, not the placeholder.
    #[must_use]
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        Self {
            temperature: get_latest_value(readings, "temperature")
                .map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v}°C")),
            humidity: get_latest_value(readings, "humidity")
                .map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v}%")),
        }
    }

    /// Build the card for a room out of the all-sensors snapshot. Unknown
    /// rooms yield the all-placeholder card.
    #[must_use]
    pub fn for_room(snapshot: &AllSensors, room_id: &str) -> Self {
        let readings = snapshot
            .get(room_id)
            .map_or(&[] as &[SensorReading], |room| room.sensors.as_slice());
        Self::from_readings(readings)
    }

    /// Card with no data at all, shown while readings are unavailable.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
        }
    }
}
