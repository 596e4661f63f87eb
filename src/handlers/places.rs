//! Location CRUD endpoints: countries, regions, districts, cities and the
//! per-respondent place link.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::handlers::categories::NameBody;
use crate::handlers::AppState;
use crate::storage::places::{self, LocationRow, PlaceRecord};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegionBody {
    pub name: String,
    #[serde(default)]
    pub country_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DistrictBody {
    pub name: String,
    #[serde(default)]
    pub region_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CityBody {
    pub name: String,
    #[serde(default)]
    pub region_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceBody {
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub region_id: Option<i64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub city_id: Option<i64>,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceUpdateBody {
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub region_id: Option<i64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub city_id: Option<i64>,
}

pub async fn create_country(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<NamedRow>, AppError> {
    Ok(Json(places::create_country(&state.db, &body.name).await?))
}

pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedRow>>, AppError> {
    Ok(Json(places::list_countries(&state.db).await?))
}

pub async fn create_region(
    State(state): State<AppState>,
    Json(body): Json<RegionBody>,
) -> Result<Json<LocationRow>, AppError> {
    Ok(Json(places::create_region(&state.db, &body.name, body.country_id).await?))
}

pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::list_regions(&state.db).await?))
}

pub async fn list_regions_by_country(
    State(state): State<AppState>,
    Path(country_id): Path<i64>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::regions_by_country(&state.db, country_id).await?))
}

pub async fn create_district(
    State(state): State<AppState>,
    Json(body): Json<DistrictBody>,
) -> Result<Json<LocationRow>, AppError> {
    Ok(Json(places::create_district(&state.db, &body.name, body.region_id).await?))
}

pub async fn list_districts(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::list_districts(&state.db).await?))
}

pub async fn list_districts_by_region(
    State(state): State<AppState>,
    Path(region_id): Path<i64>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::districts_by_region(&state.db, region_id).await?))
}

pub async fn create_city(
    State(state): State<AppState>,
    Json(body): Json<CityBody>,
) -> Result<Json<LocationRow>, AppError> {
    Ok(Json(places::create_city(&state.db, &body.name, body.region_id).await?))
}

pub async fn list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::list_cities(&state.db).await?))
}

pub async fn list_cities_by_region(
    State(state): State<AppState>,
    Path(region_id): Path<i64>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    Ok(Json(places::cities_by_region(&state.db, region_id).await?))
}

pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CityBody>,
) -> Result<Json<LocationRow>, AppError> {
    places::update_city(&state.db, id, &body.name, body.region_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("city {}", id)))
}

pub async fn create_place(
    State(state): State<AppState>,
    Json(body): Json<PlaceBody>,
) -> Result<Json<PlaceRecord>, AppError> {
    Ok(Json(
        places::create_place(
            &state.db,
            body.country_id,
            body.region_id,
            body.district_id,
            body.city_id,
            body.user_id,
        )
        .await?,
    ))
}

pub async fn list_places(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceRecord>>, AppError> {
    Ok(Json(places::list_places(&state.db).await?))
}

pub async fn get_place_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PlaceRecord>, AppError> {
    places::place_by_user(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("place for user {}", user_id)))
}

pub async fn update_place_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<PlaceUpdateBody>,
) -> Result<Json<PlaceRecord>, AppError> {
    places::update_place_for_user(
        &state.db,
        user_id,
        body.country_id,
        body.region_id,
        body.district_id,
        body.city_id,
    )
    .await?
    .map(Json)
    .ok_or_else(|| AppError::NotFound(format!("place for user {}", user_id)))
}
