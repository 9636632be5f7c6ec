//! FloorManager - single entry point for floor reads and writes
//!
//! # Commit Flow
//!
//! ```text
//! commit(request, option, expected_version)
//!     ├─ 1. Validate request
//!     ├─ 2. Take the writer lock
//!     ├─ 3. Begin write transaction, load snapshot
//!     ├─ 4. Compare expected_version (optional)
//!     ├─ 5. Re-validate and apply the assignment in memory
//!     ├─ 6. Bump version, store snapshot + assignment record
//!     ├─ 7. Commit transaction
//!     └─ 8. Broadcast TableAssigned
//! ```
//!
//! Routing queries never take the lock; they read the last committed
//! snapshot through a redb read transaction.

mod error;
pub use error::*;

use super::merger::{MergeReport, merge_predictions};
use super::router;
use super::storage::FloorStorage;
use super::updater::apply_assignment;
use crate::core::RoutingConfig;
use crate::utils::validation::{validate_floor_document, validate_party_request};
use parking_lot::Mutex;
use shared::{
    AssignmentRecord, CommitResponse, FloorEvent, FloorEventPayload, FloorSnapshot, PartyRequest,
    PredictionPayload, RoutingOption, RoutingResponse,
};
use std::path::Path;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Routing rounds `seat` spends before giving up
const SEAT_ATTEMPTS: usize = 16;

/// FloorManager owns the floor storage and serializes every mutation.
///
/// The `epoch` field is generated on each startup so subscribers can detect
/// a restart and reload the floor.
pub struct FloorManager {
    storage: FloorStorage,
    config: RoutingConfig,
    event_tx: broadcast::Sender<FloorEvent>,
    /// Instance epoch - unique ID generated on startup
    epoch: String,
    /// Single-writer lock around load → mutate → store
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for FloorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorManager")
            .field("storage", &"<FloorStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl FloorManager {
    /// Create a FloorManager with the database at `db_path`
    pub fn new(db_path: impl AsRef<Path>, config: RoutingConfig) -> ManagerResult<Self> {
        let storage = FloorStorage::open(db_path)?;
        let manager = Self::with_storage(storage, config);
        tracing::info!(epoch = %manager.epoch, "FloorManager started with new epoch");
        Ok(manager)
    }

    /// Create a FloorManager with existing storage
    pub fn with_storage(storage: FloorStorage, config: RoutingConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            config,
            event_tx,
            epoch: uuid::Uuid::new_v4().to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the instance epoch
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn storage(&self) -> &FloorStorage {
        &self.storage
    }

    /// Subscribe to floor events
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.event_tx.subscribe()
    }

    /// Last committed floor document
    pub fn snapshot(&self) -> ManagerResult<FloorSnapshot> {
        Ok(self.storage.load_snapshot()?)
    }

    pub fn assignments(&self) -> ManagerResult<Vec<AssignmentRecord>> {
        Ok(self.storage.get_assignments()?)
    }

    /// Replace the whole floor document (import from the floor plan system).
    ///
    /// The stored version keeps counting up across imports so options
    /// computed before the import are rejected by a version check.
    /// Assignment records of the previous document are dropped.
    pub fn replace_snapshot(&self, mut snapshot: FloorSnapshot) -> ManagerResult<u64> {
        validate_floor_document(&snapshot).map_err(ManagerError::MalformedInput)?;

        let _guard = self.write_lock.lock();
        let txn = self.storage.begin_write()?;
        let current = self.storage.load_snapshot_txn(&txn)?;
        snapshot.version = current.version.max(snapshot.version) + 1;
        self.storage.store_snapshot(&txn, &snapshot)?;
        self.storage.clear_assignments(&txn)?;
        self.storage.commit(txn)?;

        tracing::info!(
            version = snapshot.version,
            tables = snapshot.tables.len(),
            waiters = snapshot.waiters.len(),
            "Floor snapshot replaced"
        );
        self.broadcast(FloorEvent::new(
            snapshot.version,
            FloorEventPayload::SnapshotReplaced {
                tables: snapshot.tables.len(),
                waiters: snapshot.waiters.len(),
            },
        ));
        Ok(snapshot.version)
    }

    /// Merge a classifier payload into the stored floor.
    ///
    /// A payload that changes nothing is not written and does not bump the
    /// version.
    pub fn apply_predictions(&self, payload: &PredictionPayload) -> ManagerResult<MergeReport> {
        let _guard = self.write_lock.lock();
        let txn = self.storage.begin_write()?;
        let mut snapshot = self.storage.load_snapshot_txn(&txn)?;
        let before = snapshot.tables.clone();

        let report = merge_predictions(&mut snapshot.tables, payload);
        if snapshot.tables == before {
            self.storage.abort(txn)?;
            tracing::debug!(version = snapshot.version, "Predictions changed nothing");
            return Ok(report);
        }

        snapshot.version += 1;
        self.storage.store_snapshot(&txn, &snapshot)?;
        self.storage.commit(txn)?;

        tracing::info!(
            version = snapshot.version,
            matched = report.matched,
            defaulted = report.defaulted,
            ignored = report.ignored,
            "Predictions merged"
        );
        self.broadcast(FloorEvent::new(
            snapshot.version,
            FloorEventPayload::PredictionsMerged {
                matched: report.matched,
                defaulted: report.defaulted,
                ignored: report.ignored,
            },
        ));
        Ok(report)
    }

    /// Ranked options for a party. Read-only.
    pub fn route(&self, request: &PartyRequest) -> ManagerResult<RoutingResponse> {
        validate_party_request(request, !self.config.size_brackets.is_empty())
            .map_err(ManagerError::MalformedInput)?;
        let snapshot = self.storage.load_snapshot()?;
        Ok(router::route(&snapshot, request, &self.config))
    }

    /// Commit a chosen option.
    ///
    /// `expected_version` is the `snapshot_version` of the routing answer the
    /// option came from; pass `None` to rely on the commit-time checks alone.
    pub fn commit(
        &self,
        request: &PartyRequest,
        option: &RoutingOption,
        expected_version: Option<u64>,
    ) -> ManagerResult<AssignmentRecord> {
        validate_party_request(request, !self.config.size_brackets.is_empty())
            .map_err(ManagerError::MalformedInput)?;

        let _guard = self.write_lock.lock();
        let txn = self.storage.begin_write()?;
        let mut snapshot = self.storage.load_snapshot_txn(&txn)?;

        if let Some(expected) = expected_version
            && expected != snapshot.version
        {
            tracing::warn!(
                group_id = %request.group_id,
                expected,
                actual = snapshot.version,
                "Commit rejected: snapshot changed"
            );
            return Err(ManagerError::VersionConflict {
                expected,
                actual: snapshot.version,
            });
        }

        if let Err(e) = apply_assignment(
            &mut snapshot,
            option,
            request,
            self.config.max_tables_per_waiter,
        ) {
            tracing::warn!(
                group_id = %request.group_id,
                table_id = %option.table_id,
                waiter_id = %option.waiter_id,
                error = %e,
                "Commit rejected"
            );
            return Err(e.into());
        }

        snapshot.version += 1;
        let record = AssignmentRecord {
            group_id: request.group_id.clone(),
            table_id: option.table_id.clone(),
            waiter_id: option.waiter_id.clone(),
            party_size: request.party_size,
            is_reserved: request.is_reserved,
            score: option.score,
            snapshot_version: snapshot.version,
            assigned_at: shared::util::now_millis(),
        };
        self.storage.store_snapshot(&txn, &snapshot)?;
        self.storage.record_assignment(&txn, &record)?;
        self.storage.commit(txn)?;

        tracing::info!(
            group_id = %record.group_id,
            table_id = %record.table_id,
            waiter_id = %record.waiter_id,
            version = record.snapshot_version,
            "Table assigned"
        );
        self.broadcast(FloorEvent::new(
            record.snapshot_version,
            FloorEventPayload::TableAssigned {
                group_id: record.group_id.clone(),
                table_id: record.table_id.clone(),
                waiter_id: record.waiter_id.clone(),
            },
        ));
        Ok(record)
    }

    /// [`commit`](Self::commit) folded into a response for service callers
    pub fn execute_commit(
        &self,
        request: &PartyRequest,
        option: &RoutingOption,
        expected_version: Option<u64>,
    ) -> CommitResponse {
        match self.commit(request, option, expected_version) {
            Ok(record) => CommitResponse::success(record),
            Err(err) => CommitResponse::error(request.group_id.clone(), err.into()),
        }
    }

    /// Route and commit the best option that still applies.
    ///
    /// Every commit is checked against the version the options were routed
    /// from. When another writer got in first the party is routed again;
    /// options rejected at the same version fall through to the next rank.
    pub fn seat(&self, request: &PartyRequest) -> ManagerResult<AssignmentRecord> {
        for _ in 0..SEAT_ATTEMPTS {
            let response = self.route(request)?;
            if response.options.is_empty() {
                break;
            }
            let mut floor_changed = false;
            for option in &response.options {
                match self.commit(request, option, Some(response.snapshot_version)) {
                    Ok(record) => return Ok(record),
                    Err(ManagerError::VersionConflict { .. }) => {
                        floor_changed = true;
                        break;
                    }
                    Err(e) if e.try_next_option() || e.is_stale_reference() => {
                        tracing::debug!(rank = option.rank, error = %e, "Trying next option");
                    }
                    Err(e) => return Err(e),
                }
            }
            if !floor_changed {
                break;
            }
            tracing::debug!(group_id = %request.group_id, "Floor changed while seating, routing again");
        }
        Err(ManagerError::NoAvailability(request.group_id.clone()))
    }

    fn broadcast(&self, event: FloorEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Floor event dropped: no active receivers");
        }
    }
}

#[cfg(test)]
mod tests;
