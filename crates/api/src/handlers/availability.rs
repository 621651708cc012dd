//! # Availability Handlers
//!
//! Reports which parts of an organizer's calendar are already occupied,
//! grouped by UTC date. The report lists busy time; clients that show free
//! slots invert it themselves.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use meets_core::{
    availability,
    models::{availability::AvailabilityResponse, identity::AuthenticatedUser},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
///
/// * `uuid` - Organizer whose calendar is read (defaults to the caller)
/// * `from` - First date, `YYYY-MM-DD` (defaults to today, UTC)
/// * `to` - Last bound, `YYYY-MM-DD` (defaults to `from` + 6 days)
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub uuid: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Returns the occupied slots of an organizer per date.
///
/// ```text
/// GET /api/availability?uuid=<organizer>&from=2025-06-02&to=2025-06-08
/// ```
///
/// # Errors
///
/// * `MeetError::Validation` - Malformed `from`/`to`, or `from` after `to`
/// * `MeetError::Timeout` / `MeetError::Infrastructure` - Storage failures
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let from = date_bound("from", query.from.as_deref())?;
    let to = date_bound("to", query.to.as_deref())?;

    let dates = state
        .meets
        .query_availability(query.uuid.as_deref(), from, to, &user)
        .await?;

    Ok(Json(availability::into_response(dates)))
}

fn date_bound(
    field: &str,
    value: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, AppError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(Some(availability::parse_date_bound(field, value)?)),
        _ => Ok(None),
    }
}
