//! Routing options and responses

use super::AssignmentRecord;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// One ranked (table, waiter) candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingOption {
    /// 1-based position in the returned list
    pub rank: usize,
    pub table_id: String,
    pub waiter_id: String,
    pub score: f64,
    pub section: String,
    pub capacity: u32,
    /// Capacity fit + preference bonus part of `score`
    pub table_fit: f64,
    /// Waiter priority part of `score`
    pub waiter_priority: f64,
    /// Size bracket name when routed without a party size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<String>,
}

/// Outcome of a routing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStatus {
    Ok,
    NoAvailability,
}

/// Answer to a routing query (read-only, nothing persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResponse {
    pub group_id: String,
    /// Version of the snapshot the options were computed from
    pub snapshot_version: u64,
    pub status: RoutingStatus,
    pub options: Vec<RoutingOption>,
}

impl RoutingResponse {
    pub fn new(group_id: String, snapshot_version: u64, options: Vec<RoutingOption>) -> Self {
        let status = if options.is_empty() {
            RoutingStatus::NoAvailability
        } else {
            RoutingStatus::Ok
        };
        Self {
            group_id,
            snapshot_version,
            status,
            options,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RoutingStatus::Ok
    }

    pub fn best(&self) -> Option<&RoutingOption> {
        self.options.first()
    }
}

/// Answer to a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResponse {
    pub group_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AssignmentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl CommitResponse {
    pub fn success(assignment: AssignmentRecord) -> Self {
        Self {
            group_id: assignment.group_id.clone(),
            success: true,
            assignment: Some(assignment),
            error: None,
        }
    }

    pub fn error(group_id: String, error: AppError) -> Self {
        Self {
            group_id,
            success: false,
            assignment: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(rank: usize) -> RoutingOption {
        RoutingOption {
            rank,
            table_id: format!("T{rank}"),
            waiter_id: "W1".to_string(),
            score: 10.0,
            section: "A".to_string(),
            capacity: 4,
            table_fit: 4.0,
            waiter_priority: 6.0,
            bracket: None,
        }
    }

    #[test]
    fn test_empty_options_means_no_availability() {
        let resp = RoutingResponse::new("g-1".into(), 3, vec![]);
        assert_eq!(resp.status, RoutingStatus::NoAvailability);
        assert!(!resp.is_available());
        assert!(resp.best().is_none());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "no_availability");
    }

    #[test]
    fn test_best_is_first_option() {
        let resp = RoutingResponse::new("g-1".into(), 3, vec![option(1), option(2)]);
        assert_eq!(resp.status, RoutingStatus::Ok);
        assert_eq!(resp.best().unwrap().table_id, "T1");
    }

    #[test]
    fn test_bracket_omitted_when_none() {
        let json = serde_json::to_value(option(1)).unwrap();
        assert!(json.get("bracket").is_none());
    }
}
