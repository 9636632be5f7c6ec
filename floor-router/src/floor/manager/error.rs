use super::super::storage::StorageError;
use super::super::updater::AssignError;
use shared::TableState;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Malformed input: {0}")]
    MalformedInput(AppError),

    /// Stale reference: the option names a table that no longer exists
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Stale reference: the option names a waiter that no longer exists
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

    #[error("Waiter is not available: {0}")]
    WaiterUnavailable(String),

    #[error("Snapshot version conflict: expected {expected}, current {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("No availability for group {0}")]
    NoAvailability(String),
}

impl ManagerError {
    /// The option refers to a table or waiter that is gone; route again
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::TableNotFound(_) | Self::WaiterNotFound(_))
    }

    /// Worth trying the next-ranked option of the same routing answer
    pub fn try_next_option(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::TableAlreadyAssigned { .. }
                | Self::TableNotClean { .. }
                | Self::TableTooSmall { .. }
                | Self::WaiterUnavailable(_)
        )
    }
}

/// 将存储错误转换为错误码
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();

    // 磁盘空间不足
    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    // 数据损坏
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // 默认：系统繁忙
    ErrorCode::SystemBusy
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                AppError::with_message(code, e.to_string())
            }
            ManagerError::MalformedInput(e) => e,
            ManagerError::TableNotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table not found: {id}"))
                    .with_detail("table_id", id)
            }
            ManagerError::WaiterNotFound(id) => {
                AppError::with_message(ErrorCode::WaiterNotFound, format!("Waiter not found: {id}"))
                    .with_detail("waiter_id", id)
            }
            ManagerError::CapacityExceeded {
                waiter_id,
                live_tables,
                max,
            } => AppError::new(ErrorCode::WaiterCapacityExceeded)
                .with_detail("waiter_id", waiter_id)
                .with_detail("live_tables", live_tables)
                .with_detail("max", max),
            ManagerError::TableAlreadyAssigned { table_id, group_id } => {
                AppError::new(ErrorCode::TableAlreadyAssigned)
                    .with_detail("table_id", table_id)
                    .with_detail("group_id", group_id)
            }
            ManagerError::GroupAlreadySeated { group_id, table_id } => {
                AppError::new(ErrorCode::GroupAlreadySeated)
                    .with_detail("group_id", group_id)
                    .with_detail("table_id", table_id)
            }
            ManagerError::TableNotClean { table_id, state } => {
                AppError::new(ErrorCode::TableNotClean)
                    .with_detail("table_id", table_id)
                    .with_detail("state", state.as_str())
            }
            ManagerError::TableTooSmall {
                table_id,
                capacity,
                party_size,
            } => AppError::new(ErrorCode::TableTooSmall)
                .with_detail("table_id", table_id)
                .with_detail("capacity", capacity)
                .with_detail("party_size", party_size),
            ManagerError::WaiterUnavailable(id) => {
                AppError::new(ErrorCode::WaiterUnavailable).with_detail("waiter_id", id)
            }
            ManagerError::VersionConflict { expected, actual } => {
                AppError::new(ErrorCode::SnapshotVersionConflict)
                    .with_detail("expected", expected)
                    .with_detail("actual", actual)
            }
            ManagerError::NoAvailability(group_id) => {
                AppError::new(ErrorCode::NoAvailability).with_detail("group_id", group_id)
            }
        }
    }
}

impl From<AssignError> for ManagerError {
    fn from(err: AssignError) -> Self {
        match err {
            AssignError::TableNotFound(id) => ManagerError::TableNotFound(id),
            AssignError::WaiterNotFound(id) => ManagerError::WaiterNotFound(id),
            AssignError::CapacityExceeded {
                waiter_id,
                live_tables,
                max,
            } => ManagerError::CapacityExceeded {
                waiter_id,
                live_tables,
                max,
            },
            AssignError::TableAlreadyAssigned { table_id, group_id } => {
                ManagerError::TableAlreadyAssigned { table_id, group_id }
            }
            AssignError::GroupAlreadySeated { group_id, table_id } => {
                ManagerError::GroupAlreadySeated { group_id, table_id }
            }
            AssignError::TableNotClean { table_id, state } => {
                ManagerError::TableNotClean { table_id, state }
            }
            AssignError::TableTooSmall {
                table_id,
                capacity,
                party_size,
            } => ManagerError::TableTooSmall {
                table_id,
                capacity,
                party_size,
            },
            AssignError::WaiterUnavailable(id) => ManagerError::WaiterUnavailable(id),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
