//! Income-bracket CRUD endpoints.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::handlers::categories::NameBody;
use crate::handlers::{AppState, MessageResponse};
use crate::storage::reference;
use axum::extract::{Path, State};
use axum::Json;

pub async fn create_income(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    Ok(Json(reference::create_income(&state.db, &body.name).await?))
}

pub async fn list_income(State(state): State<AppState>) -> Result<Json<Vec<NamedRow>>, AppError> {
    Ok(Json(reference::list_income(&state.db).await?))
}

pub async fn get_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRow>, AppError> {
    reference::income_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("income bracket {}", id)))
}

pub async fn update_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    reference::update_income(&state.db, id, &body.name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("income bracket {}", id)))
}

pub async fn delete_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if reference::delete_income(&state.db, id).await? {
        Ok(Json(MessageResponse::new("income deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("income bracket {}", id)))
    }
}
