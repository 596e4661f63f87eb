//! Respondent CRUD endpoints.

use crate::error::AppError;
use crate::handlers::{AppState, MessageResponse};
use crate::storage::users::{self, UserPatch, UserRecord};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserRecord,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserPatch>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users::create_user(&state.db, &body).await?;
    Ok(Json(UserResponse { user }))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, AppError> {
    Ok(Json(users::list_users(&state.db).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserRecord>, AppError> {
    users::user_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UserPatch>,
) -> Result<Json<UserRecord>, AppError> {
    users::update_user(&state.db, id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if users::delete_user(&state.db, id).await? {
        Ok(Json(MessageResponse::new("user deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("user {}", id)))
    }
}
