//! Cleaner / Host Models
//!
//! Carried through the floor document untouched; the router never reads them.

use serde::{Deserialize, Serialize};

/// Cleaner entity (保洁)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cleaner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// Host entity (迎宾)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub on_duty: bool,
}
