//! POST /api/v1/calculateCost

use crate::error::AppError;
use crate::handlers::AppState;
use crate::pricing::{self, QuoteRequest};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Request body; field casing mirrors the historical endpoint.
#[derive(Debug, Deserialize)]
pub struct CalculateCostRequest {
    #[serde(rename = "userAmount")]
    pub user_amount: i64,
    #[serde(rename = "timeParamsId", default)]
    pub time_params_id: Option<i64>,
    #[serde(rename = "targetParamsId", default)]
    pub target_params_id: Option<i64>,
    #[serde(default)]
    pub min_age: Option<i64>,
    #[serde(default)]
    pub max_age: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CalculateCostResponse {
    pub result: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub async fn calculate_cost(
    State(state): State<AppState>,
    Json(request): Json<CalculateCostRequest>,
) -> Result<Json<CalculateCostResponse>, AppError> {
    // A zero parameter id is the "unset" sentinel on the wire.
    let quote_request = QuoteRequest {
        user_amount: request.user_amount,
        time_params_id: request.time_params_id.filter(|&id| id != 0),
        target_params_id: request.target_params_id.filter(|&id| id != 0),
        min_age: request.min_age,
        max_age: request.max_age,
    };

    let quote = pricing::compute_cost(&state.db, state.lookup_mode, &quote_request).await?;

    Ok(Json(CalculateCostResponse { result: quote.cost, warnings: quote.warnings }))
}
