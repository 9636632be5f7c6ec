//! Floor routing engine
//!
//! - **storage**: redb persistence for the floor document and assignments
//! - **merger**: classifier predictions → table state
//! - **filter**: clean / capacity / preference / size-bracket table selection
//! - **scorer**: waiter availability and priority
//! - **ranker**: (table, waiter) pair scoring and ordering
//! - **router**: read-only routing query
//! - **updater**: commit-time checks and the assignment transition
//! - **manager**: FloorManager sequencing all of the above
//!
//! # Data Flow
//!
//! ```text
//! FloorStorage ─load→ merger ─→ filter ─→ scorer ─→ ranker ─→ options
//!                                                               │
//!                      caller picks one ←───────────────────────┘
//!                              │
//!                        updater ─store→ FloorStorage ─→ broadcast
//! ```

pub mod filter;
pub mod manager;
pub mod merger;
pub mod ranker;
pub mod router;
pub mod scorer;
pub mod storage;
pub mod updater;

pub use filter::{SizeBracket, TableFilter};
pub use manager::{FloorManager, ManagerError, ManagerResult};
pub use merger::{MergeReport, merge_predictions};
pub use ranker::PairRanker;
pub use router::route;
pub use scorer::WaiterScorer;
pub use storage::{FloorStorage, StorageError, StorageResult};
pub use updater::{AssignError, apply_assignment};
