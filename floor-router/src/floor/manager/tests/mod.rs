use super::*;
use crate::floor::storage::FloorStorage;
use shared::{Table, TableState, TableType, Waiter};

fn create_test_manager() -> FloorManager {
    let storage = FloorStorage::open_in_memory().unwrap();
    FloorManager::with_storage(storage, RoutingConfig::default())
}

fn clean_table(id: &str, section: &str, ty: TableType, capacity: u32) -> Table {
    let mut table = Table::new(id, section, ty, capacity);
    table.state = TableState::Clean;
    table.state_confidence = 0.95;
    table
}

/// 12 tables in four sections, 8 waiters scored 6.8 to 9.1, nobody busy
fn scenario_floor() -> FloorSnapshot {
    let tables = vec![
        clean_table("A1", "A", TableType::Bar, 2),
        clean_table("A2", "A", TableType::Booth, 4),
        clean_table("A3", "A", TableType::Window, 6),
        clean_table("B1", "B", TableType::Regular, 2),
        clean_table("B2", "B", TableType::Booth, 6),
        clean_table("B3", "B", TableType::Regular, 8),
        clean_table("C1", "C", TableType::Window, 4),
        clean_table("C2", "C", TableType::Booth, 4),
        clean_table("C3", "C", TableType::Regular, 6),
        clean_table("D1", "D", TableType::Bar, 2),
        clean_table("D2", "D", TableType::Regular, 4),
        clean_table("D3", "D", TableType::Window, 8),
    ];
    let waiters = vec![
        Waiter::new("WA1", "Alba", 8.2, "A"),
        Waiter::new("WA2", "Aitor", 7.5, "A"),
        Waiter::new("WB1", "Bea", 9.1, "B"),
        Waiter::new("WB2", "Bruno", 6.8, "B"),
        Waiter::new("WC1", "Carla", 7.9, "C"),
        Waiter::new("WC2", "Cesar", 8.8, "C"),
        Waiter::new("WD1", "Dani", 7.1, "D"),
        Waiter::new("WD2", "Diana", 8.5, "D"),
    ];
    FloorSnapshot {
        version: 0,
        tables,
        waiters,
        cleaners: vec![],
        hosts: vec![],
    }
}

fn seeded_manager() -> FloorManager {
    let manager = create_test_manager();
    manager.replace_snapshot(scenario_floor()).unwrap();
    manager
}

fn booth_request(group_id: &str) -> PartyRequest {
    PartyRequest::new(group_id, Some(4)).with_preference(TableType::Booth)
}
