//! Party Request

use crate::models::TableType;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Incoming party waiting to be seated (候位请求)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRequest {
    pub group_id: String,
    /// `None` when the host did not record a head count; the router then
    /// answers per size bracket.
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub is_reserved: bool,
    #[serde(default)]
    pub table_preference: Option<TableType>,
    #[serde(default)]
    pub requested_time: Option<Timestamp>,
}

impl PartyRequest {
    pub fn new(group_id: impl Into<String>, party_size: Option<u32>) -> Self {
        Self {
            group_id: group_id.into(),
            party_size,
            is_reserved: false,
            table_preference: None,
            requested_time: None,
        }
    }

    pub fn with_preference(mut self, preference: TableType) -> Self {
        self.table_preference = Some(preference);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request() {
        let req: PartyRequest = serde_json::from_str(r#"{"group_id":"g-1"}"#).unwrap();
        assert_eq!(req.group_id, "g-1");
        assert_eq!(req.party_size, None);
        assert!(!req.is_reserved);
        assert!(req.table_preference.is_none());
    }

    #[test]
    fn test_full_request() {
        let req: PartyRequest = serde_json::from_str(
            r#"{"group_id":"g-2","party_size":4,"is_reserved":true,
                "table_preference":"booth","requested_time":1760000000000}"#,
        )
        .unwrap();
        assert_eq!(req.party_size, Some(4));
        assert!(req.is_reserved);
        assert_eq!(req.table_preference, Some(TableType::Booth));
        assert_eq!(req.requested_time, Some(1_760_000_000_000));
    }
}
