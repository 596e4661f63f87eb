//! Parameter-category CRUD endpoints.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::handlers::{AppState, MessageResponse};
use crate::storage::reference;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    Ok(Json(reference::create_category(&state.db, &body.name).await?))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedRow>>, AppError> {
    Ok(Json(reference::list_categories(&state.db).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRow>, AppError> {
    reference::category_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {}", id)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    reference::update_category(&state.db, id, &body.name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {}", id)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if reference::delete_category(&state.db, id).await? {
        Ok(Json(MessageResponse::new("category deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("category {}", id)))
    }
}
