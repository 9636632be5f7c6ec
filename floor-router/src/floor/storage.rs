//! redb-based storage for the floor document
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `floor_snapshot` | `"floor"` | `FloorSnapshot` | Current floor document |
//! | `assignments` | `group_id` | `AssignmentRecord` | Committed assignments |
//!
//! Every mutation writes the whole snapshot inside one write transaction,
//! together with its assignment record when there is one. Readers see either
//! the old document or the new one.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::{AssignmentRecord, FloorSnapshot};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Floor document: key = SNAPSHOT_KEY, value = JSON-serialized FloorSnapshot
const SNAPSHOT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("floor_snapshot");

/// Assignment log: key = group_id, value = JSON-serialized AssignmentRecord
const ASSIGNMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("assignments");

const SNAPSHOT_KEY: &str = "floor";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Floor storage backed by redb
#[derive(Clone)]
pub struct FloorStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for FloorStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorStorage").finish_non_exhaustive()
    }
}

impl FloorStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, dry runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOT_TABLE)?;
            let _ = write_txn.open_table(ASSIGNMENTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Commit a write transaction
    pub fn commit(&self, txn: WriteTransaction) -> StorageResult<()> {
        txn.commit()?;
        Ok(())
    }

    /// Discard a write transaction
    pub fn abort(&self, txn: WriteTransaction) -> StorageResult<()> {
        txn.abort()?;
        Ok(())
    }

    // ========== Snapshot ==========

    /// Current floor document; an empty floor at version 0 before the first import
    pub fn load_snapshot(&self) -> StorageResult<FloorSnapshot> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOT_TABLE)?;
        match table.get(SNAPSHOT_KEY)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(FloorSnapshot::default()),
        }
    }

    /// Current floor document (within transaction)
    pub fn load_snapshot_txn(&self, txn: &WriteTransaction) -> StorageResult<FloorSnapshot> {
        let table = txn.open_table(SNAPSHOT_TABLE)?;
        match table.get(SNAPSHOT_KEY)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(FloorSnapshot::default()),
        }
    }

    /// Replace the floor document (within transaction)
    pub fn store_snapshot(
        &self,
        txn: &WriteTransaction,
        snapshot: &FloorSnapshot,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(SNAPSHOT_TABLE)?;
        let value = serde_json::to_vec(snapshot)?;
        table.insert(SNAPSHOT_KEY, value.as_slice())?;
        Ok(())
    }

    // ========== Assignments ==========

    /// Record a committed assignment (within transaction)
    pub fn record_assignment(
        &self,
        txn: &WriteTransaction,
        record: &AssignmentRecord,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ASSIGNMENTS_TABLE)?;
        let value = serde_json::to_vec(record)?;
        table.insert(record.group_id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get the assignment for a group
    pub fn get_assignment(&self, group_id: &str) -> StorageResult<Option<AssignmentRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSIGNMENTS_TABLE)?;
        match table.get(group_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All assignments, ordered by commit version
    pub fn get_assignments(&self) -> StorageResult<Vec<AssignmentRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSIGNMENTS_TABLE)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let record: AssignmentRecord = serde_json::from_slice(value.value())?;
            records.push(record);
        }
        records.sort_by_key(|r| r.snapshot_version);
        Ok(records)
    }

    /// Drop all assignment records (within transaction)
    ///
    /// A replaced floor document invalidates every earlier assignment.
    pub fn clear_assignments(&self, txn: &WriteTransaction) -> StorageResult<()> {
        let mut table = txn.open_table(ASSIGNMENTS_TABLE)?;
        table.retain(|_, _| false)?;
        Ok(())
    }

    pub fn assignment_count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSIGNMENTS_TABLE)?;
        Ok(table.len()?)
    }
}
