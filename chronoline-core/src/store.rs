//! Persistent key-value slots and the event log.
//!
//! Storage is a flat set of named slots, one file per slot under a data
//! directory. The event log owns the in-memory sequence and mirrors it to a
//! single slot on every mutation; writes always rewrite the whole sequence.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::event::{Event, Timestamp};

/// Slot key under which the event log is persisted.
pub const EVENTS_KEY: &str = "events";

/// Errors that can occur in storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A flat collection of named slots. Any implementation may be substituted
/// for the file-backed default.
pub trait KeyValueStore {
    /// Read a slot. An absent slot yields `None`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a slot. Removing an absent slot is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// File-backed slots: one `<key>.json` file per slot under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the file backing a slot.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slots, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// The ordered event history of a session, mirrored to one persistent slot
/// after every mutation.
pub struct EventLog<S> {
    events: Vec<Event>,
    store: S,
}

impl<S: KeyValueStore> EventLog<S> {
    /// Load the log from the store. An absent, unreadable, or malformed slot
    /// yields an empty log; no error surfaces to the caller.
    pub fn load(store: S) -> Self {
        let events = match store.get(EVENTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(events) => events,
                Err(e) => {
                    log::debug!("discarding malformed event slot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::debug!("event slot unreadable, starting empty: {e}");
                Vec::new()
            }
        };
        Self { events, store }
    }

    /// Append an event and rewrite the whole slot.
    ///
    /// O(n) per append; expected scale is a few hundred manually-entered
    /// events.
    pub fn append(&mut self, name: impl Into<String>, time: Timestamp) -> Result<(), StoreError> {
        self.events.push(Event::new(time, name));
        self.persist()
    }

    /// Drop every event and remove the slot entirely. No empty-array state
    /// is left behind.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.events.clear();
        self.store.remove(EVENTS_KEY)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.events)?;
        self.store.set(EVENTS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_persist_then_load_preserves_events() {
        let mut store = MemoryStore::new();
        {
            let mut log = EventLog::load(&mut store);
            log.append("standup", t(9, 0, 12)).unwrap();
            log.append("review", t(10, 30, 0)).unwrap();
            log.append("", t(11, 5, 59)).unwrap();
        }

        let log = EventLog::load(&mut store);
        assert_eq!(log.len(), 3);
        assert_eq!(log.events()[0].name, "standup");
        assert_eq!(log.events()[0].time, t(9, 0, 12));
        assert_eq!(log.events()[2].name, "");
        assert_eq!(log.events()[2].time, t(11, 5, 59));
    }

    #[test]
    fn test_subsecond_precision_truncates_to_seconds() {
        use chrono::Timelike;

        let mut store = MemoryStore::new();
        let time = t(9, 0, 12).with_nanosecond(500_000_000).unwrap();
        {
            let mut log = EventLog::load(&mut store);
            log.append("x", time).unwrap();
        }

        // the stored string carries seconds only
        let log = EventLog::load(&mut store);
        assert_eq!(log.events()[0].time, t(9, 0, 12));
    }

    #[test]
    fn test_clear_removes_the_slot() {
        let mut store = MemoryStore::new();
        {
            let mut log = EventLog::load(&mut store);
            log.append("one", t(8, 0, 1)).unwrap();
            log.clear().unwrap();
            assert!(log.is_empty());
        }

        assert!(!store.contains(EVENTS_KEY));
        let log = EventLog::load(&mut store);
        assert!(log.is_empty());
    }

    #[test]
    fn test_malformed_slot_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(EVENTS_KEY, "{not json").unwrap();
        assert!(EventLog::load(&mut store).is_empty());

        store
            .set(EVENTS_KEY, r#"[{"time":"garbage","name":"x"}]"#)
            .unwrap();
        assert!(EventLog::load(&mut store).is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        {
            let mut log = EventLog::load(&mut store);
            log.append("deploy", t(16, 45, 30)).unwrap();
        }
        assert!(dir.path().join("events.json").exists());

        let log = EventLog::load(&mut store);
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].name, "deploy");
        assert_eq!(log.events()[0].time, t(16, 45, 30));
    }

    #[test]
    fn test_file_store_clear_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let mut log = EventLog::load(&mut store);
        log.append("x", t(1, 2, 3)).unwrap();
        log.clear().unwrap();
        assert!(!dir.path().join("events.json").exists());
        // clearing again is still fine
        log.clear().unwrap();
    }
}
