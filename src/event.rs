//! Event record: one occurrence to be logged.

use serde::{Deserialize, Deserializer, Serialize};

/// A single telemetry event. Every omitted field resolves to zero (or no data).
///
/// Built fluently:
///
/// ```
/// use webtics::{EventRecord, EventType};
///
/// let shot = EventRecord::new(EventType::PlayerShoot)
///     .subtype(1)
///     .position(10, -4, 0)
///     .magnitude(0.5);
/// assert_eq!(shot.event_type, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_type: i32,
    #[serde(default)]
    pub subtype: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub magnitude: f64,
    /// Never `Some("")`: empty text is stored as `None`, matching what the wire carries.
    #[serde(
        default,
        deserialize_with = "deserialize_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<String>,
}

fn non_empty(data: Option<String>) -> Option<String> {
    data.filter(|d| !d.is_empty())
}

fn deserialize_data<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(non_empty)
}

impl EventRecord {
    /// Type-only form.
    pub fn new(event_type: impl Into<i32>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// Type + magnitude.
    pub fn with_magnitude(event_type: impl Into<i32>, magnitude: f64) -> Self {
        Self::new(event_type).magnitude(magnitude)
    }

    /// Type + subtype + magnitude.
    pub fn with_subtype_magnitude(
        event_type: impl Into<i32>,
        subtype: impl Into<i32>,
        magnitude: f64,
    ) -> Self {
        Self::new(event_type).subtype(subtype).magnitude(magnitude)
    }

    /// Type + position.
    pub fn at(event_type: impl Into<i32>, x: i32, y: i32, z: i32) -> Self {
        Self::new(event_type).position(x, y, z)
    }

    /// Type + free text data.
    pub fn with_data(event_type: impl Into<i32>, data: impl Into<String>) -> Self {
        Self::new(event_type).data(data)
    }

    /// Every field spelled out.
    #[allow(clippy::too_many_arguments)]
    pub fn full(
        event_type: impl Into<i32>,
        subtype: impl Into<i32>,
        x: i32,
        y: i32,
        z: i32,
        magnitude: f64,
        data: Option<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            subtype: subtype.into(),
            x,
            y,
            z,
            magnitude,
            data: non_empty(data),
        }
    }

    pub fn subtype(mut self, subtype: impl Into<i32>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn position(mut self, x: i32, y: i32, z: i32) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = non_empty(Some(data.into()));
        self
    }

    /// Data that will actually go on the wire; empty strings are omitted.
    pub fn wire_data(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }
}
