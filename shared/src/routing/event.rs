//! Floor events
//!
//! Broadcast after every persisted mutation of the floor document.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Floor event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorEvent {
    /// Snapshot version produced by the mutation
    pub version: u64,
    pub timestamp: Timestamp,
    pub payload: FloorEventPayload,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloorEventPayload {
    /// Whole document replaced by an import
    SnapshotReplaced { tables: usize, waiters: usize },
    /// Classifier predictions merged
    PredictionsMerged {
        matched: usize,
        defaulted: usize,
        ignored: usize,
    },
    /// Party seated
    TableAssigned {
        group_id: String,
        table_id: String,
        waiter_id: String,
    },
}

impl FloorEvent {
    pub fn new(version: u64, payload: FloorEventPayload) -> Self {
        Self {
            version,
            timestamp: crate::util::now_millis(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_tagged() {
        let event = FloorEvent::new(
            7,
            FloorEventPayload::TableAssigned {
                group_id: "g-1".into(),
                table_id: "T3".into(),
                waiter_id: "W2".into(),
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["version"], 7);
        assert_eq!(json["payload"]["type"], "TABLE_ASSIGNED");
        assert_eq!(json["payload"]["table_id"], "T3");
    }
}
