//! Classifier prediction merger
//!
//! Overlays `predicted_state` / `state_confidence` from the vision
//! classifier onto the floor. Only those two fields are written.

use serde::{Deserialize, Serialize};
use shared::{PredictionPayload, Table, TableState};
use std::collections::HashMap;

/// Counts reported by [`merge_predictions`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Tables that received a prediction
    pub matched: usize,
    /// Tables absent from the payload, reset to unknown
    pub defaulted: usize,
    /// Payload rows naming no known table
    pub ignored: usize,
}

/// Merge a prediction payload into `tables` in place.
///
/// Tables missing from the payload become `unknown` with confidence 0.0.
/// Duplicate rows for one table resolve to the last row. Never fails.
pub fn merge_predictions(tables: &mut [Table], payload: &PredictionPayload) -> MergeReport {
    let mut latest: HashMap<&str, (TableState, f64)> = HashMap::with_capacity(payload.tables.len());
    for prediction in &payload.tables {
        latest.insert(
            prediction.table_id.as_str(),
            (
                prediction.predicted_state,
                clamp_confidence(prediction.state_confidence),
            ),
        );
    }

    let mut report = MergeReport::default();
    for table in tables.iter_mut() {
        match latest.remove(table.table_id.as_str()) {
            Some((state, confidence)) => {
                table.state = state;
                table.state_confidence = confidence;
                report.matched += 1;
            }
            None => {
                table.state = TableState::Unknown;
                table.state_confidence = 0.0;
                report.defaulted += 1;
            }
        }
    }

    report.ignored = latest.len();
    if report.ignored > 0 {
        let mut unknown: Vec<&str> = latest.keys().copied().collect();
        unknown.sort_unstable();
        tracing::warn!(?unknown, "Predictions for unknown tables ignored");
    }
    report
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TablePrediction, TableType};

    fn prediction(id: &str, state: TableState, confidence: f64) -> TablePrediction {
        TablePrediction {
            table_id: id.to_string(),
            predicted_state: state,
            state_confidence: confidence,
        }
    }

    fn tables() -> Vec<Table> {
        vec![
            Table::new("T1", "A", TableType::Booth, 4),
            Table::new("T2", "A", TableType::Bar, 2),
            Table::new("T3", "B", TableType::Window, 6),
        ]
    }

    #[test]
    fn test_merge_sets_state_and_defaults_missing() {
        let mut tables = tables();
        tables[2].state = TableState::Clean;
        tables[2].state_confidence = 0.8;

        let payload = PredictionPayload {
            tables: vec![
                prediction("T1", TableState::Clean, 0.93),
                prediction("T2", TableState::Dirty, 0.71),
            ],
        };
        let report = merge_predictions(&mut tables, &payload);

        assert_eq!(report, MergeReport { matched: 2, defaulted: 1, ignored: 0 });
        assert_eq!(tables[0].state, TableState::Clean);
        assert_eq!(tables[0].state_confidence, 0.93);
        assert_eq!(tables[1].state, TableState::Dirty);
        assert_eq!(tables[2].state, TableState::Unknown);
        assert_eq!(tables[2].state_confidence, 0.0);
    }

    #[test]
    fn test_merge_keeps_layout_fields_and_group_link() {
        let mut tables = tables();
        tables[0].current_group_id = Some("g-1".into());
        let before = tables.clone();

        let payload = PredictionPayload {
            tables: vec![prediction("T1", TableState::Dirty, 0.5)],
        };
        merge_predictions(&mut tables, &payload);

        for (a, b) in before.iter().zip(&tables) {
            assert_eq!(a.table_id, b.table_id);
            assert_eq!(a.section, b.section);
            assert_eq!(a.table_type, b.table_type);
            assert_eq!(a.capacity, b.capacity);
            assert_eq!(a.current_group_id, b.current_group_id);
        }
    }

    #[test]
    fn test_confidence_is_clamped() {
        let mut tables = tables();
        let payload = PredictionPayload {
            tables: vec![
                prediction("T1", TableState::Clean, 1.7),
                prediction("T2", TableState::Clean, -0.2),
                prediction("T3", TableState::Clean, f64::NAN),
            ],
        };
        merge_predictions(&mut tables, &payload);
        assert_eq!(tables[0].state_confidence, 1.0);
        assert_eq!(tables[1].state_confidence, 0.0);
        assert_eq!(tables[2].state_confidence, 0.0);
    }

    #[test]
    fn test_last_duplicate_wins_and_unknown_rows_ignored() {
        let mut tables = tables();
        let payload = PredictionPayload {
            tables: vec![
                prediction("T1", TableState::Dirty, 0.6),
                prediction("T9", TableState::Clean, 0.9),
                prediction("T1", TableState::Clean, 0.8),
            ],
        };
        let report = merge_predictions(&mut tables, &payload);
        assert_eq!(report.matched, 1);
        assert_eq!(report.ignored, 1);
        assert_eq!(tables[0].state, TableState::Clean);
        assert_eq!(tables[0].state_confidence, 0.8);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let payload = PredictionPayload {
            tables: vec![
                prediction("T2", TableState::Occupied, 0.66),
                prediction("T3", TableState::Clean, 1.2),
            ],
        };
        let mut once = tables();
        merge_predictions(&mut once, &payload);
        let mut twice = once.clone();
        merge_predictions(&mut twice, &payload);
        assert_eq!(once, twice);
    }
}
