//! Family-situation CRUD endpoints.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::handlers::categories::NameBody;
use crate::handlers::{AppState, MessageResponse};
use crate::storage::reference;
use axum::extract::{Path, State};
use axum::Json;

pub async fn create_family_situation(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    Ok(Json(reference::create_family_situation(&state.db, &body.name).await?))
}

pub async fn list_family_situations(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedRow>>, AppError> {
    Ok(Json(reference::list_family_situations(&state.db).await?))
}

pub async fn get_family_situation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRow>, AppError> {
    reference::family_situation_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("family situation {}", id)))
}

pub async fn update_family_situation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    reference::update_family_situation(&state.db, id, &body.name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("family situation {}", id)))
}

pub async fn delete_family_situation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if reference::delete_family_situation(&state.db, id).await? {
        Ok(Json(MessageResponse::new("family situation deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("family situation {}", id)))
    }
}
