//! Unified error codes for the floor router
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Floor document errors
//! - 7xxx: Table errors
//! - 8xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as the bare u16 so callers in other languages can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Floor ====================
    /// Snapshot changed since the options were computed
    SnapshotVersionConflict = 1001,
    /// Party is already seated
    GroupAlreadySeated = 1002,
    /// Floor document failed validation on import
    InvalidFloorDocument = 1003,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table already linked to a party
    TableAlreadyAssigned = 7002,
    /// No clean table / free waiter for the request
    NoAvailability = 7003,
    /// Table is not clean any more
    TableNotClean = 7004,
    /// Table has fewer seats than the party
    TableTooSmall = 7005,

    // ==================== 8xxx: Staff ====================
    /// Waiter not found
    WaiterNotFound = 8001,
    /// Waiter would exceed the live table cap
    WaiterCapacityExceeded = 8002,
    /// Waiter went off duty
    WaiterUnavailable = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Whether re-running the routing cycle (or picking the next option) can succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::SnapshotVersionConflict
                | ErrorCode::TableNotFound
                | ErrorCode::TableAlreadyAssigned
                | ErrorCode::TableNotClean
                | ErrorCode::TableTooSmall
                | ErrorCode::WaiterNotFound
                | ErrorCode::WaiterCapacityExceeded
                | ErrorCode::WaiterUnavailable
                | ErrorCode::SystemBusy
        )
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Floor
            ErrorCode::SnapshotVersionConflict => "Floor snapshot changed, route again",
            ErrorCode::GroupAlreadySeated => "Party is already seated",
            ErrorCode::InvalidFloorDocument => "Floor document is invalid",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableAlreadyAssigned => "Table is already assigned",
            ErrorCode::NoAvailability => "No table or waiter available",
            ErrorCode::TableNotClean => "Table is not clean",
            ErrorCode::TableTooSmall => "Table is too small for the party",

            // Staff
            ErrorCode::WaiterNotFound => "Waiter not found",
            ErrorCode::WaiterCapacityExceeded => "Waiter has reached the live table limit",
            ErrorCode::WaiterUnavailable => "Waiter is unavailable",

            // System
            ErrorCode::InternalError => "Internal server error",

            // Storage
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Floor
            1001 => Ok(ErrorCode::SnapshotVersionConflict),
            1002 => Ok(ErrorCode::GroupAlreadySeated),
            1003 => Ok(ErrorCode::InvalidFloorDocument),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableAlreadyAssigned),
            7003 => Ok(ErrorCode::NoAvailability),
            7004 => Ok(ErrorCode::TableNotClean),
            7005 => Ok(ErrorCode::TableTooSmall),

            // Staff
            8001 => Ok(ErrorCode::WaiterNotFound),
            8002 => Ok(ErrorCode::WaiterCapacityExceeded),
            8003 => Ok(ErrorCode::WaiterUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
