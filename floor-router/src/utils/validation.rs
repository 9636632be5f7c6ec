//! Input validation helpers
//!
//! Boundary checks for documents handed to the router. Anything rejected
//! here surfaces to callers as `ValidationFailed`.

use shared::error::{AppError, ErrorCode};
use shared::{FloorSnapshot, PartyRequest};
use std::collections::HashSet;

/// Group IDs, table IDs, waiter IDs
pub const MAX_ID_LEN: usize = 128;

/// Largest party the host stand can enter
pub const MAX_PARTY_SIZE: u32 = 100;

/// Validate that a required id is non-empty and within the length limit.
pub fn validate_id(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > MAX_ID_LEN {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {MAX_ID_LEN})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate a party request.
///
/// `brackets_configured` tells whether a request without `party_size` can be
/// answered per size bracket.
pub fn validate_party_request(
    request: &PartyRequest,
    brackets_configured: bool,
) -> Result<(), AppError> {
    validate_id(&request.group_id, "group_id")?;
    match request.party_size {
        Some(0) => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "party_size must be at least 1",
        )),
        Some(n) if n > MAX_PARTY_SIZE => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("party_size {n} exceeds {MAX_PARTY_SIZE}"),
        )),
        None if !brackets_configured => Err(AppError::with_message(
            ErrorCode::RequiredField,
            "party_size is required when no size brackets are configured",
        )),
        _ => Ok(()),
    }
}

/// Validate a floor document before it replaces the stored one.
pub fn validate_floor_document(snapshot: &FloorSnapshot) -> Result<(), AppError> {
    let mut table_ids = HashSet::new();
    for table in &snapshot.tables {
        validate_id(&table.table_id, "table_id")?;
        if !table_ids.insert(table.table_id.as_str()) {
            return Err(invalid_document(format!(
                "duplicate table_id {}",
                table.table_id
            )));
        }
        if table.capacity == 0 {
            return Err(invalid_document(format!(
                "table {} has zero capacity",
                table.table_id
            )));
        }
        if !(0.0..=1.0).contains(&table.state_confidence) {
            return Err(invalid_document(format!(
                "table {} state_confidence {} is outside [0, 1]",
                table.table_id, table.state_confidence
            )));
        }
    }

    let mut waiter_ids = HashSet::new();
    for waiter in &snapshot.waiters {
        validate_id(&waiter.id, "waiter id")?;
        if !waiter_ids.insert(waiter.id.as_str()) {
            return Err(invalid_document(format!("duplicate waiter id {}", waiter.id)));
        }
        if !waiter.score.is_finite() {
            return Err(invalid_document(format!(
                "waiter {} has a non-finite score",
                waiter.id
            )));
        }
        if !(waiter.current_tip_total.is_finite() && waiter.current_tip_total >= 0.0) {
            return Err(invalid_document(format!(
                "waiter {} has an invalid tip total",
                waiter.id
            )));
        }
    }

    let mut seated = HashSet::new();
    for group_id in snapshot
        .tables
        .iter()
        .filter_map(|t| t.current_group_id.as_deref())
    {
        if !seated.insert(group_id) {
            return Err(invalid_document(format!(
                "group {group_id} is linked to more than one table"
            )));
        }
    }

    Ok(())
}

fn invalid_document(message: String) -> AppError {
    AppError::with_message(ErrorCode::InvalidFloorDocument, message)
}
