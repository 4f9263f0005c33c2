//! Event model and the codec for the persisted slot.
//!
//! Events travel through the slot as `{time: string, name: string}` records;
//! the time string is human-readable and round-trips at seconds precision.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Point-in-time value attached to an event. Naive local time with seconds
/// precision.
pub type Timestamp = NaiveDateTime;

/// Format of the `time` field in the persisted slot.
pub const STORED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A user-recorded `{time, name}` pair. The name may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredEvent", try_from = "StoredEvent")]
pub struct Event {
    pub time: Timestamp,
    pub name: String,
}

impl Event {
    pub fn new(time: Timestamp, name: impl Into<String>) -> Self {
        Self {
            time,
            name: name.into(),
        }
    }
}

/// Wire form of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEvent {
    time: String,
    name: String,
}

impl From<Event> for StoredEvent {
    fn from(event: Event) -> Self {
        Self {
            time: event.time.format(STORED_TIME_FORMAT).to_string(),
            name: event.name,
        }
    }
}

impl TryFrom<StoredEvent> for Event {
    type Error = chrono::ParseError;

    fn try_from(stored: StoredEvent) -> Result<Self, Self::Error> {
        let time = NaiveDateTime::parse_from_str(&stored.time, STORED_TIME_FORMAT)?;
        Ok(Self {
            time,
            name: stored.name,
        })
    }
}
