//! State Updater
//!
//! Applies a chosen option to an in-memory snapshot. Every check runs
//! before the first write, so a rejected assignment leaves the snapshot
//! exactly as it was.

use shared::{FloorSnapshot, PartyRequest, RoutingOption, TableState, WaiterStatus};
use thiserror::Error;

/// Reasons an option can no longer be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Waiter not found: {0}")]
    WaiterNotFound(String),

    #[error("Waiter {waiter_id} is at capacity ({live_tables}/{max})")]
    CapacityExceeded {
        waiter_id: String,
        live_tables: u32,
        max: u32,
    },

    #[error("Table {table_id} is already assigned to group {group_id}")]
    TableAlreadyAssigned { table_id: String, group_id: String },

    #[error("Group {group_id} is already seated at table {table_id}")]
    GroupAlreadySeated { group_id: String, table_id: String },

    #[error("Table {table_id} is {state}, not clean")]
    TableNotClean { table_id: String, state: TableState },

    #[error("Table {table_id} seats {capacity}, party of {party_size}")]
    TableTooSmall {
        table_id: String,
        capacity: u32,
        party_size: u32,
    },

    #[error("Waiter {0} is not available")]
    WaiterUnavailable(String),
}

/// Link the party to the table and add one live table to the waiter.
///
/// Table `state`, `state_confidence` and the waiter's tip total are left
/// alone.
pub fn apply_assignment(
    snapshot: &mut FloorSnapshot,
    option: &RoutingOption,
    request: &PartyRequest,
    max_tables_per_waiter: u32,
) -> Result<(), AssignError> {
    let table = snapshot
        .table(&option.table_id)
        .ok_or_else(|| AssignError::TableNotFound(option.table_id.clone()))?;
    let waiter = snapshot
        .waiter(&option.waiter_id)
        .ok_or_else(|| AssignError::WaiterNotFound(option.waiter_id.clone()))?;

    if let Some(seated) = snapshot.table_for_group(&request.group_id) {
        return Err(AssignError::GroupAlreadySeated {
            group_id: request.group_id.clone(),
            table_id: seated.table_id.clone(),
        });
    }
    if let Some(group_id) = &table.current_group_id {
        return Err(AssignError::TableAlreadyAssigned {
            table_id: table.table_id.clone(),
            group_id: group_id.clone(),
        });
    }
    if table.state != TableState::Clean {
        return Err(AssignError::TableNotClean {
            table_id: table.table_id.clone(),
            state: table.state,
        });
    }
    if let Some(party_size) = request.party_size
        && table.capacity < party_size
    {
        return Err(AssignError::TableTooSmall {
            table_id: table.table_id.clone(),
            capacity: table.capacity,
            party_size,
        });
    }
    if waiter.status != WaiterStatus::Available {
        return Err(AssignError::WaiterUnavailable(waiter.id.clone()));
    }
    if waiter.live_tables.saturating_add(1) > max_tables_per_waiter {
        return Err(AssignError::CapacityExceeded {
            waiter_id: waiter.id.clone(),
            live_tables: waiter.live_tables,
            max: max_tables_per_waiter,
        });
    }

    // Both lookups succeeded above and nothing has been removed since.
    if let Some(table) = snapshot.table_mut(&option.table_id) {
        table.current_group_id = Some(request.group_id.clone());
    }
    if let Some(waiter) = snapshot.waiter_mut(&option.waiter_id) {
        waiter.live_tables += 1;
    }
    Ok(())
}
