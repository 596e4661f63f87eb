//! POST /api/v1/searchUsers

use crate::error::AppError;
use crate::filter::{
    build_conditions, AgeRange, Criteria, FinancialFilter, Gender, GenderFilter,
};
use crate::handlers::AppState;
use crate::storage::count::count_users;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Request body; every dimension is optional and sentinel values
/// (gender "Both", financial situation "Any", zeroed ids/ages) mean
/// "no constraint".
#[derive(Debug, Default, Deserialize)]
pub struct SearchUsersRequest {
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub region_id: Option<i64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub city_id: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age_min: Option<i64>,
    #[serde(default)]
    pub age_max: Option<i64>,
    #[serde(default)]
    pub purchase_category_id: Option<i64>,
    #[serde(default)]
    pub purchase_frequency_id: Option<i64>,
    #[serde(default)]
    pub income_id: Option<i64>,
    #[serde(default)]
    pub financial_situation: Option<String>,
    #[serde(default)]
    pub family_situation_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchUsersResponse {
    #[serde(rename = "totalUsers")]
    pub total_users: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub async fn search_users(
    State(state): State<AppState>,
    Json(request): Json<SearchUsersRequest>,
) -> Result<Json<SearchUsersResponse>, AppError> {
    let criteria = criteria_from_request(&request)?;

    let (conditions, warnings) =
        build_conditions(&state.db, state.lookup_mode, &criteria).await?;
    let total_users = count_users(&state.db, &conditions).await?;

    metrics::counter!("panel_searches_total").increment(1);

    Ok(Json(SearchUsersResponse { total_users, warnings }))
}

/// Translate the wire shape into typed criteria, resolving sentinels.
fn criteria_from_request(request: &SearchUsersRequest) -> Result<Criteria, AppError> {
    let gender = match request.gender.as_deref() {
        None | Some("Both") => GenderFilter::Any,
        Some(value) => GenderFilter::Only(value.parse::<Gender>().map_err(|_| {
            AppError::Validation(format!("gender must be Male, Female or Both, got '{}'", value))
        })?),
    };

    let financial_situation = match request.financial_situation.as_deref() {
        None | Some("Any") => FinancialFilter::Any,
        Some(value) => FinancialFilter::Is(value.to_string()),
    };

    // An age bound of 0 means "unset"; the band applies only when both ends
    // are given.
    let age = match (request.age_min, request.age_max) {
        (Some(min), Some(max)) if min != 0 && max != 0 => Some(AgeRange::new(min, max)?),
        _ => None,
    };

    Ok(Criteria {
        country_id: id_filter(request.country_id),
        region_id: id_filter(request.region_id),
        district_id: id_filter(request.district_id),
        city_id: id_filter(request.city_id),
        gender,
        age,
        purchase_category_id: id_filter(request.purchase_category_id),
        purchase_frequency_id: id_filter(request.purchase_frequency_id),
        income_id: id_filter(request.income_id),
        financial_situation,
        family_situation_id: id_filter(request.family_situation_id),
    })
}

/// Zero ids are the "unset" sentinel on the wire.
fn id_filter(id: Option<i64>) -> Option<i64> {
    id.filter(|&id| id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_mean_unconstrained() {
        let request = SearchUsersRequest {
            gender: Some("Both".to_string()),
            financial_situation: Some("Any".to_string()),
            age_min: Some(0),
            age_max: Some(0),
            country_id: Some(0),
            ..Default::default()
        };
        let criteria = criteria_from_request(&request).unwrap();
        assert_eq!(criteria.gender, GenderFilter::Any);
        assert_eq!(criteria.financial_situation, FinancialFilter::Any);
        assert!(criteria.age.is_none());
        assert!(criteria.country_id.is_none());
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let request = SearchUsersRequest {
            gender: Some("Other".to_string()),
            ..Default::default()
        };
        assert!(criteria_from_request(&request).is_err());
    }

    #[test]
    fn test_age_band_requires_both_bounds() {
        let request = SearchUsersRequest { age_min: Some(20), ..Default::default() };
        let criteria = criteria_from_request(&request).unwrap();
        assert!(criteria.age.is_none());

        let request = SearchUsersRequest {
            age_min: Some(20),
            age_max: Some(45),
            ..Default::default()
        };
        let criteria = criteria_from_request(&request).unwrap();
        assert_eq!(criteria.age, Some(AgeRange::new(20, 45).unwrap()));
    }
}
