//! Event Catalog
//!
//! Versioned, read-only enumeration of event type and subtype codes with their display names.
//! The catalog is registration metadata for the backend; the logging path forwards any integer
//! code it is given, catalogued or not.

use crate::error::TicsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version label sent with every registration request of the standard catalog.
pub const STANDARD_CATALOG_VERSION: &str = "1.0";

/// One catalog entry: a code and its human readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub code: i32,
    pub display_name: String,
}

impl EventDescriptor {
    pub fn new(code: i32, display_name: impl Into<String>) -> Self {
        Self {
            code,
            display_name: display_name.into(),
        }
    }
}

/// Standard event type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EventType {
    PlayerDeath = 0,
    PlayerRespawn = 1,
    PlayerShoot = 2,
    PlayerHit = 3,
    WaypointReached = 10,
    LevelComplete = 11,
    LevelFailed = 12,
    ButtonClick = 20,
    MenuOpen = 21,
    MenuClose = 22,
    TaskStart = 100,
    TaskComplete = 101,
    CorrectResponse = 102,
    IncorrectResponse = 103,
    Timeout = 104,
    AttentionTask = 200,
    ImpulsiveResponse = 201,
    SustainedAttention = 202,
    SelectiveAttention = 203,
    Custom = 255,
}

impl EventType {
    pub const ALL: [EventType; 20] = [
        EventType::PlayerDeath,
        EventType::PlayerRespawn,
        EventType::PlayerShoot,
        EventType::PlayerHit,
        EventType::WaypointReached,
        EventType::LevelComplete,
        EventType::LevelFailed,
        EventType::ButtonClick,
        EventType::MenuOpen,
        EventType::MenuClose,
        EventType::TaskStart,
        EventType::TaskComplete,
        EventType::CorrectResponse,
        EventType::IncorrectResponse,
        EventType::Timeout,
        EventType::AttentionTask,
        EventType::ImpulsiveResponse,
        EventType::SustainedAttention,
        EventType::SelectiveAttention,
        EventType::Custom,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventType::PlayerDeath => "Player Death",
            EventType::PlayerRespawn => "Player Respawn",
            EventType::PlayerShoot => "Player Shoot",
            EventType::PlayerHit => "Player Hit",
            EventType::WaypointReached => "Waypoint Reached",
            EventType::LevelComplete => "Level Complete",
            EventType::LevelFailed => "Level Failed",
            EventType::ButtonClick => "Button Click",
            EventType::MenuOpen => "Menu Open",
            EventType::MenuClose => "Menu Close",
            EventType::TaskStart => "Task Start",
            EventType::TaskComplete => "Task Complete",
            EventType::CorrectResponse => "Correct Response",
            EventType::IncorrectResponse => "Incorrect Response",
            EventType::Timeout => "Timeout",
            EventType::AttentionTask => "Attention Task",
            EventType::ImpulsiveResponse => "Impulsive Response",
            EventType::SustainedAttention => "Sustained Attention",
            EventType::SelectiveAttention => "Selective Attention",
            EventType::Custom => "Custom",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl From<EventType> for i32 {
    fn from(value: EventType) -> Self {
        value.code()
    }
}

/// Standard event subtype codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EventSubtype {
    Rifle = 0,
    Bullet = 1,
    Grenade = 2,
}

impl EventSubtype {
    pub const ALL: [EventSubtype; 3] = [
        EventSubtype::Rifle,
        EventSubtype::Bullet,
        EventSubtype::Grenade,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventSubtype::Rifle => "Rifle",
            EventSubtype::Bullet => "Bullet",
            EventSubtype::Grenade => "Grenade",
        }
    }
}

impl From<EventSubtype> for i32 {
    fn from(value: EventSubtype) -> Self {
        value.code()
    }
}

/// Closed set of event types and subtypes, ordered by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCatalog {
    version: String,
    types: Vec<EventDescriptor>,
    subtypes: Vec<EventDescriptor>,
}

impl EventCatalog {
    /// The built-in catalog shipped with the client.
    pub fn standard() -> Self {
        Self {
            version: STANDARD_CATALOG_VERSION.to_string(),
            types: EventType::ALL
                .iter()
                .map(|t| EventDescriptor::new(t.code(), t.display_name()))
                .collect(),
            subtypes: EventSubtype::ALL
                .iter()
                .map(|s| EventDescriptor::new(s.code(), s.display_name()))
                .collect(),
        }
    }

    /// Start a custom catalog for an embedding application.
    pub fn builder(version: impl Into<String>) -> EventCatalogBuilder {
        EventCatalogBuilder {
            version: version.into(),
            types: BTreeMap::new(),
            subtypes: BTreeMap::new(),
            duplicate: None,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn lookup_event_type(&self, code: i32) -> Option<&EventDescriptor> {
        self.types
            .binary_search_by_key(&code, |d| d.code)
            .ok()
            .map(|idx| &self.types[idx])
    }

    pub fn lookup_event_subtype(&self, code: i32) -> Option<&EventDescriptor> {
        self.subtypes
            .binary_search_by_key(&code, |d| d.code)
            .ok()
            .map(|idx| &self.subtypes[idx])
    }

    pub fn event_types(&self) -> &[EventDescriptor] {
        &self.types
    }

    pub fn event_subtypes(&self) -> &[EventDescriptor] {
        &self.subtypes
    }

    /// Total number of registration requests needed to push this catalog.
    pub fn len(&self) -> usize {
        self.types.len() + self.subtypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.subtypes.is_empty()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for application-specific catalogs. Duplicate codes are rejected at `build`.
pub struct EventCatalogBuilder {
    version: String,
    types: BTreeMap<i32, String>,
    subtypes: BTreeMap<i32, String>,
    duplicate: Option<String>,
}

impl EventCatalogBuilder {
    pub fn event_type(mut self, code: impl Into<i32>, display_name: impl Into<String>) -> Self {
        let code = code.into();
        if self.types.insert(code, display_name.into()).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(format!("duplicate event type code {}", code));
        }
        self
    }

    pub fn event_subtype(mut self, code: impl Into<i32>, display_name: impl Into<String>) -> Self {
        let code = code.into();
        if self.subtypes.insert(code, display_name.into()).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(format!("duplicate event subtype code {}", code));
        }
        self
    }

    pub fn build(self) -> Result<EventCatalog, TicsError> {
        if let Some(msg) = self.duplicate {
            return Err(TicsError::Catalog(msg));
        }
        if self.version.trim().is_empty() {
            return Err(TicsError::Catalog("version label cannot be empty".to_string()));
        }
        Ok(EventCatalog {
            version: self.version,
            types: self
                .types
                .into_iter()
                .map(|(code, name)| EventDescriptor::new(code, name))
                .collect(),
            subtypes: self
                .subtypes
                .into_iter()
                .map(|(code, name)| EventDescriptor::new(code, name))
                .collect(),
        })
    }
}
