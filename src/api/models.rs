use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Snapshot of every room's sensors, keyed by room identifier.
///
/// Replaced wholesale on each successful fetch; there is no merging of
/// partial updates.
pub type AllSensors = HashMap<String, RoomSnapshot>;

/// Sensor readings for a single room, as returned by `/sensors` and
/// `/sensors/{room_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomSnapshot {
    #[serde(default)]
    pub sensors: Vec<SensorReading>,
}

/// A single reading: a named field with its most recent value.
///
/// The backend attaches provenance fields (timestamp, sensor, type); they are
/// optional so the client keeps working when the backend trims its payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub field: String,
    pub value: FieldValue,
    #[serde(default)]
    pub time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub sensor_id: Option<String>,
    #[serde(default)]
    pub sensor_type: Option<String>,
}

impl SensorReading {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            time: None,
            room_id: None,
            sensor_id: None,
            sensor_type: None,
        }
    }
}

/// A reading's value. The backend emits numbers for most fields but strings
/// for a few (device states, firmware tags), so both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Optional filters for `/sensors/{room_id}`. Unset filters are omitted from
/// the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct RoomQuery {
    pub sensor_id: Option<String>,
    pub sensor_type: Option<String>,
    pub field: Option<String>,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl RoomQuery {
    /// Render the query string (without leading `?`), parameters in the
    /// order the backend documents them. Empty when no filter is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(ref sensor_id) = self.sensor_id {
            params.push(format!("sensor_id={sensor_id}"));
        }
        if let Some(ref sensor_type) = self.sensor_type {
            params.push(format!("sensor_type={sensor_type}"));
        }
        if let Some(ref field) = self.field {
            params.push(format!("field={field}"));
        }
        // The Z suffix keeps the value free of `+`, which would decode as a
        // space on the backend
        if let Some(start) = self.start_time {
            params.push(format!(
                "start_time={}",
                start.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            ));
        }
        if let Some(end) = self.end_time {
            params.push(format!(
                "end_time={}",
                end.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            ));
        }

        params.join("&")
    }
}
