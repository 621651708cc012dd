use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use meets_core::models::{
    identity::AuthenticatedUser,
    meet::{
        CreateMeetRequest, DeleteMeetResponse, MeetListResponse, MeetResponse, UpdateMeetRequest,
    },
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub organizer_id: Option<String>,
}

#[axum::debug_handler]
pub async fn create_meet(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateMeetRequest>,
) -> Result<Json<MeetResponse>, AppError> {
    let meet = state.meets.create(payload, &user).await?;
    Ok(Json(MeetResponse { meet }))
}

/// The path segment is the meet's uuid.
#[axum::debug_handler]
pub async fn update_meet(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(uuid): Path<String>,
    Json(mut payload): Json<UpdateMeetRequest>,
) -> Result<Json<MeetResponse>, AppError> {
    payload.uuid = uuid;
    let meet = state.meets.update(payload, &user).await?;
    Ok(Json(MeetResponse { meet }))
}

#[axum::debug_handler]
pub async fn get_meet(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<MeetResponse>, AppError> {
    let meet = state.meets.get_by_id(id).await?;
    Ok(Json(MeetResponse { meet }))
}

#[axum::debug_handler]
pub async fn list_meets(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MeetListResponse>, AppError> {
    let meets = state
        .meets
        .list(query.organizer_id.as_deref(), &user)
        .await?;
    Ok(Json(MeetListResponse { meets }))
}

#[axum::debug_handler]
pub async fn delete_meet(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteMeetResponse>, AppError> {
    state.meets.delete(id, &user).await?;
    Ok(Json(DeleteMeetResponse { id, deleted: true }))
}
