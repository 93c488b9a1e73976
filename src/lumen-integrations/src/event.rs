//! Events flowing through the global processor pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// A captured event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub event_id: Uuid,

    /// Capture time
    pub timestamp: DateTime<Utc>,

    /// Severity
    #[serde(default)]
    pub level: Level,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Indexed key/value tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Arbitrary additional data
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Event {
    /// Create an empty event at the current time.
    pub fn new(level: Level) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            message: None,
            tags: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Add extra data.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = Event::new(Level::Error)
            .with_message("boom")
            .with_tag("release", "1.2.0")
            .with_extra("attempt", serde_json::json!(3));

        assert_eq!(event.level, Level::Error);
        assert_eq!(event.message.as_deref(), Some("boom"));
        assert_eq!(event.tags.get("release").map(String::as_str), Some("1.2.0"));
        assert_eq!(event.extra["attempt"], 3);
    }

    #[test]
    fn test_level_serializes_snake_case() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Level::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_event_json_omits_missing_message() {
        let event = Event::default();
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("message").is_none());
        assert_eq!(value["level"], "info");
    }
}
