//! Chronoline Core Library
//!
//! Event log and storage, time scale, ordinal colors, label layout, and
//! auto-fit geometry for the timeline chart.

pub mod color;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod scale;
pub mod store;

// Re-export commonly used types and functions
pub use color::{OrdinalScale, CATEGORY10};
pub use event::{Event, Timestamp, STORED_TIME_FORMAT};
pub use geometry::{fit_to_nodes, Dimensions, Margin};
pub use layout::{Direction, ForceLayout, LabelInput, LayoutEngine, Node};
pub use scale::TimeScale;
pub use store::{EventLog, FileStore, KeyValueStore, MemoryStore, StoreError, EVENTS_KEY};

/// Version information for the Chronoline core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
