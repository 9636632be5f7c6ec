//! Vision classifier payload
//!
//! The classifier posts one row per table it could see. Extra fields
//! (bounding boxes, person counts, ...) are ignored.

use crate::models::TableState;
use serde::{Deserialize, Serialize};

/// Per-table prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePrediction {
    pub table_id: String,
    pub predicted_state: TableState,
    #[serde(default)]
    pub state_confidence: f64,
}

/// Prediction batch for the whole floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    #[serde(default)]
    pub tables: Vec<TablePrediction>,
}
