//! Assignment record

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Durable log entry for one committed (table, waiter) assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub group_id: String,
    pub table_id: String,
    pub waiter_id: String,
    pub party_size: Option<u32>,
    pub is_reserved: bool,
    /// Score of the option the caller picked
    pub score: f64,
    /// Snapshot version produced by this commit
    pub snapshot_version: u64,
    pub assigned_at: Timestamp,
}
