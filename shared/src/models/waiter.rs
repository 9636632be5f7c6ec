//! Waiter Model

use serde::{Deserialize, Serialize};

/// Waiter duty status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaiterStatus {
    #[default]
    Available,
    Unavailable,
}

/// Waiter entity (服务员)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waiter {
    pub id: String,
    pub name: String,
    /// Performance score, higher is better
    pub score: f64,
    /// Tips collected so far this shift
    #[serde(default)]
    pub current_tip_total: f64,
    /// Tables currently assigned and not yet checked out
    #[serde(default)]
    pub live_tables: u32,
    #[serde(default)]
    pub status: WaiterStatus,
    pub section: String,
}

impl Waiter {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        score: f64,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
            current_tip_total: 0.0,
            live_tables: 0,
            status: WaiterStatus::Available,
            section: section.into(),
        }
    }

    pub fn is_on_duty(&self) -> bool {
        self.status == WaiterStatus::Available
    }
}
