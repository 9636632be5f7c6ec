//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cleanliness / occupancy state observed by the vision classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableState {
    Clean,
    Dirty,
    Occupied,
    /// No prediction for this table in the latest payload
    #[default]
    Unknown,
}

impl TableState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Occupied => "occupied",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table type (靠窗、卡座、普通、吧台)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    Window,
    Booth,
    Regular,
    Bar,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Booth => "booth",
            Self::Regular => "regular",
            Self::Bar => "bar",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity (桌台)
///
/// `state` / `state_confidence` are owned by the prediction merger.
/// `current_group_id` is owned by the assignment path; the two never
/// overwrite each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: String,
    /// Section code (A, B, C, ...)
    pub section: String,
    #[serde(rename = "type")]
    pub table_type: TableType,
    pub capacity: u32,
    #[serde(default)]
    pub state: TableState,
    #[serde(default)]
    pub state_confidence: f64,
    /// Party currently seated here by the router
    #[serde(default)]
    pub current_group_id: Option<String>,
}

impl Table {
    pub fn new(
        table_id: impl Into<String>,
        section: impl Into<String>,
        table_type: TableType,
        capacity: u32,
    ) -> Self {
        Self {
            table_id: table_id.into(),
            section: section.into(),
            table_type,
            capacity,
            state: TableState::Unknown,
            state_confidence: 0.0,
            current_group_id: None,
        }
    }

    /// Whether the router has linked a party to this table
    pub fn is_assigned(&self) -> bool {
        self.current_group_id.is_some()
    }

    /// Clean and not linked to any party
    pub fn is_seatable(&self) -> bool {
        self.state == TableState::Clean && !self.is_assigned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_type_field_is_renamed() {
        let table = Table::new("T1", "A", TableType::Booth, 4);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["type"], "booth");
        assert_eq!(json["state"], "unknown");
        assert!(json.get("table_type").is_none());
    }

    #[test]
    fn test_table_defaults_when_fields_missing() {
        let table: Table = serde_json::from_str(
            r#"{"table_id":"T9","section":"C","type":"window","capacity":2}"#,
        )
        .unwrap();
        assert_eq!(table.state, TableState::Unknown);
        assert_eq!(table.state_confidence, 0.0);
        assert!(table.current_group_id.is_none());
    }

    #[test]
    fn test_is_seatable() {
        let mut table = Table::new("T1", "A", TableType::Regular, 4);
        assert!(!table.is_seatable());

        table.state = TableState::Clean;
        assert!(table.is_seatable());

        table.current_group_id = Some("g-1".to_string());
        assert!(!table.is_seatable());
    }
}
