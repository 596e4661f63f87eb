//! Weighting-parameter CRUD endpoints.

use crate::error::AppError;
use crate::handlers::{AppState, MessageResponse};
use crate::pricing::Parameter;
use crate::storage::params;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ParameterBody {
    pub name: String,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

pub async fn create_parameter(
    State(state): State<AppState>,
    Json(body): Json<ParameterBody>,
) -> Result<Json<Parameter>, AppError> {
    let param =
        params::create_parameter(&state.db, &body.name, body.ratio, body.category_id).await?;
    Ok(Json(param))
}

pub async fn list_parameters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Parameter>>, AppError> {
    Ok(Json(params::list_parameters(&state.db).await?))
}

pub async fn get_parameter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Parameter>, AppError> {
    params::parameter_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("parameter {}", id)))
}

pub async fn list_parameters_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<Parameter>>, AppError> {
    Ok(Json(params::parameters_by_category(&state.db, category_id).await?))
}

pub async fn update_parameter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ParameterBody>,
) -> Result<Json<Parameter>, AppError> {
    params::update_parameter(&state.db, id, &body.name, body.ratio, body.category_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("parameter {}", id)))
}

pub async fn delete_parameter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if params::delete_parameter(&state.db, id).await? {
        Ok(Json(MessageResponse::new("parameter deleted successfully.")))
    } else {
        Err(AppError::NotFound(format!("parameter {}", id)))
    }
}
