//! Purchase-category and purchase-frequency CRUD endpoints.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::handlers::categories::NameBody;
use crate::handlers::{AppState, MessageResponse};
use crate::storage::reference::{self, PurchaseFrequency};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

pub async fn create_purchase_category(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    Ok(Json(reference::create_purchase_category(&state.db, &body.name).await?))
}

pub async fn list_purchase_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedRow>>, AppError> {
    Ok(Json(reference::list_purchase_categories(&state.db).await?))
}

pub async fn get_purchase_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRow>, AppError> {
    reference::purchase_category_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("purchase category {}", id)))
}

pub async fn update_purchase_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    reference::update_purchase_category(&state.db, id, &body.name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("purchase category {}", id)))
}

pub async fn delete_purchase_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if reference::delete_purchase_category(&state.db, id).await? {
        Ok(Json(MessageResponse::new("purchase category deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("purchase category {}", id)))
    }
}

#[derive(Debug, Deserialize)]
pub struct PurchaseFrequencyBody {
    pub name: String,
    #[serde(default)]
    pub purchase_category_id: Option<i64>,
}

pub async fn create_purchase_frequency(
    State(state): State<AppState>,
    Json(body): Json<PurchaseFrequencyBody>,
) -> Result<Json<PurchaseFrequency>, AppError> {
    Ok(Json(
        reference::create_purchase_frequency(&state.db, &body.name, body.purchase_category_id)
            .await?,
    ))
}

pub async fn list_purchase_frequencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<PurchaseFrequency>>, AppError> {
    Ok(Json(reference::list_purchase_frequencies(&state.db).await?))
}

pub async fn list_purchase_frequencies_by_category(
    State(state): State<AppState>,
    Path(purchase_category_id): Path<i64>,
) -> Result<Json<Vec<PurchaseFrequency>>, AppError> {
    Ok(Json(
        reference::purchase_frequencies_by_category(&state.db, purchase_category_id).await?,
    ))
}

pub async fn get_purchase_frequency(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PurchaseFrequency>, AppError> {
    reference::purchase_frequency_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("purchase frequency {}", id)))
}

pub async fn update_purchase_frequency(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<PurchaseFrequencyBody>,
) -> Result<Json<PurchaseFrequency>, AppError> {
    reference::update_purchase_frequency(&state.db, id, &body.name, body.purchase_category_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("purchase frequency {}", id)))
}

pub async fn delete_purchase_frequency(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if reference::delete_purchase_frequency(&state.db, id).await? {
        Ok(Json(MessageResponse::new("purchase frequency deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("purchase frequency {}", id)))
    }
}
