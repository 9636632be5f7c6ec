//! Floor Snapshot Model

use super::{Cleaner, Host, Table, Waiter};
use serde::{Deserialize, Serialize};

/// Full floor document (楼面快照)
///
/// `version` increases by one on every persisted mutation. Documents
/// imported without a version start at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub waiters: Vec<Waiter>,
    #[serde(default)]
    pub cleaners: Vec<Cleaner>,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

impl FloorSnapshot {
    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_id == table_id)
    }

    pub fn table_mut(&mut self, table_id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.table_id == table_id)
    }

    pub fn waiter(&self, waiter_id: &str) -> Option<&Waiter> {
        self.waiters.iter().find(|w| w.id == waiter_id)
    }

    pub fn waiter_mut(&mut self, waiter_id: &str) -> Option<&mut Waiter> {
        self.waiters.iter_mut().find(|w| w.id == waiter_id)
    }

    /// Table currently holding the given party, if any
    pub fn table_for_group(&self, group_id: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.current_group_id.as_deref() == Some(group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableType;

    #[test]
    fn test_snapshot_accepts_document_without_version() {
        let json = r#"{
            "tables": [{"table_id":"T1","section":"A","type":"booth","capacity":4}],
            "waiters": [{"id":"W1","name":"Ana","score":8.2,"section":"A"}],
            "cleaners": [{"id":"C1","name":"Luis","status":"idle"}],
            "hosts": [{"id":"H1","name":"Mar","on_duty":true}]
        }"#;
        let snapshot: FloorSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.tables.len(), 1);
        assert_eq!(snapshot.tables[0].table_type, TableType::Booth);
        assert_eq!(snapshot.waiters[0].live_tables, 0);
        assert!(snapshot.hosts[0].on_duty);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut snapshot = FloorSnapshot::default();
        snapshot.tables.push(Table::new("T1", "A", TableType::Regular, 2));
        snapshot.tables.push(Table::new("T2", "B", TableType::Bar, 2));
        snapshot.waiters.push(Waiter::new("W1", "Ana", 8.0, "A"));

        assert!(snapshot.table("T2").is_some());
        assert!(snapshot.table("T3").is_none());
        assert!(snapshot.waiter("W1").is_some());

        snapshot.table_mut("T2").unwrap().current_group_id = Some("g-7".into());
        assert_eq!(snapshot.table_for_group("g-7").unwrap().table_id, "T2");
        assert!(snapshot.table_for_group("g-8").is_none());
    }
}
