//! Shared types for the floor router
//!
//! Floor document models, routing DTOs, and the unified error codes used by
//! the router and by whatever service layer sits in front of it.

pub mod error;
pub mod models;
pub mod routing;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Cleaner, FloorSnapshot, Host, Table, TableState, TableType, Waiter, WaiterStatus};
pub use routing::{
    AssignmentRecord, CommitResponse, FloorEvent, FloorEventPayload, PartyRequest,
    PredictionPayload, RoutingOption, RoutingResponse, RoutingStatus, TablePrediction,
};
