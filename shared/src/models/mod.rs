//! Data models
//!
//! Floor document entities shared between the router and its callers.
//! All IDs are strings assigned by the floor plan / staffing system.

pub mod floor;
pub mod staff;
pub mod table;
pub mod waiter;

// Re-exports
pub use floor::*;
pub use staff::*;
pub use table::*;
pub use waiter::*;
