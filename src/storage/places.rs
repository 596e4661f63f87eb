//! Location reference tables (country/region/district/city) and the place
//! link that ties a respondent to them.

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A named location row with an optional parent id (country has none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// One respondent's location link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: i64,
    pub country_id: Option<i64>,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub city_id: Option<i64>,
    pub user_id: i64,
}

fn row_to_place(row: &SqliteRow) -> PlaceRecord {
    PlaceRecord {
        id: row.get("id"),
        country_id: row.get("country_id"),
        region_id: row.get("region_id"),
        district_id: row.get("district_id"),
        city_id: row.get("city_id"),
        user_id: row.get("user_id"),
    }
}

// Countries

pub async fn create_country(db: &Database, name: &str) -> Result<NamedRow, AppError> {
    let result = sqlx::query("INSERT INTO country (name) VALUES (?)")
        .bind(name)
        .execute(db.pool())
        .await?;

    Ok(NamedRow { id: result.last_insert_rowid(), name: name.to_string() })
}

pub async fn list_countries(db: &Database) -> Result<Vec<NamedRow>, AppError> {
    let rows = sqlx::query("SELECT id, name FROM country ORDER BY id")
        .fetch_all(db.pool())
        .await?;

    Ok(rows
        .iter()
        .map(|row| NamedRow { id: row.get("id"), name: row.get("name") })
        .collect())
}

// Regions

pub async fn create_region(
    db: &Database,
    name: &str,
    country_id: Option<i64>,
) -> Result<LocationRow, AppError> {
    let result = sqlx::query("INSERT INTO region (name, country_id) VALUES (?, ?)")
        .bind(name)
        .bind(country_id)
        .execute(db.pool())
        .await?;

    Ok(LocationRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        parent_id: country_id,
    })
}

pub async fn list_regions(db: &Database) -> Result<Vec<LocationRow>, AppError> {
    location_rows(db, "SELECT id, name, country_id AS parent_id FROM region ORDER BY id", None).await
}

pub async fn regions_by_country(db: &Database, country_id: i64) -> Result<Vec<LocationRow>, AppError> {
    location_rows(
        db,
        "SELECT id, name, country_id AS parent_id FROM region WHERE country_id = ? ORDER BY id",
        Some(country_id),
    )
    .await
}

// Districts

pub async fn create_district(
    db: &Database,
    name: &str,
    region_id: Option<i64>,
) -> Result<LocationRow, AppError> {
    let result = sqlx::query("INSERT INTO district (name, region_id) VALUES (?, ?)")
        .bind(name)
        .bind(region_id)
        .execute(db.pool())
        .await?;

    Ok(LocationRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        parent_id: region_id,
    })
}

pub async fn list_districts(db: &Database) -> Result<Vec<LocationRow>, AppError> {
    location_rows(db, "SELECT id, name, region_id AS parent_id FROM district ORDER BY id", None).await
}

pub async fn districts_by_region(db: &Database, region_id: i64) -> Result<Vec<LocationRow>, AppError> {
    location_rows(
        db,
        "SELECT id, name, region_id AS parent_id FROM district WHERE region_id = ? ORDER BY id",
        Some(region_id),
    )
    .await
}

// Cities

pub async fn create_city(
    db: &Database,
    name: &str,
    region_id: Option<i64>,
) -> Result<LocationRow, AppError> {
    let result = sqlx::query("INSERT INTO city (name, region_id) VALUES (?, ?)")
        .bind(name)
        .bind(region_id)
        .execute(db.pool())
        .await?;

    Ok(LocationRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        parent_id: region_id,
    })
}

pub async fn list_cities(db: &Database) -> Result<Vec<LocationRow>, AppError> {
    location_rows(db, "SELECT id, name, region_id AS parent_id FROM city ORDER BY id", None).await
}

pub async fn cities_by_region(db: &Database, region_id: i64) -> Result<Vec<LocationRow>, AppError> {
    location_rows(
        db,
        "SELECT id, name, region_id AS parent_id FROM city WHERE region_id = ? ORDER BY id",
        Some(region_id),
    )
    .await
}

pub async fn update_city(
    db: &Database,
    id: i64,
    name: &str,
    region_id: Option<i64>,
) -> Result<Option<LocationRow>, AppError> {
    let result = sqlx::query("UPDATE city SET name = ?, region_id = ? WHERE id = ?")
        .bind(name)
        .bind(region_id)
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(LocationRow { id, name: name.to_string(), parent_id: region_id }))
}

async fn location_rows(
    db: &Database,
    sql: &str,
    bind_id: Option<i64>,
) -> Result<Vec<LocationRow>, AppError> {
    let query = sqlx::query(sql);
    let query = match bind_id {
        Some(id) => query.bind(id),
        None => query,
    };
    let rows = query.fetch_all(db.pool()).await?;

    Ok(rows
        .iter()
        .map(|row| LocationRow {
            id: row.get("id"),
            name: row.get("name"),
            parent_id: row.get("parent_id"),
        })
        .collect())
}

// Place links

pub async fn create_place(
    db: &Database,
    country_id: Option<i64>,
    region_id: Option<i64>,
    district_id: Option<i64>,
    city_id: Option<i64>,
    user_id: i64,
) -> Result<PlaceRecord, AppError> {
    let result = sqlx::query(
        "INSERT INTO place (country_id, region_id, district_id, city_id, user_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(country_id)
    .bind(region_id)
    .bind(district_id)
    .bind(city_id)
    .bind(user_id)
    .execute(db.pool())
    .await?;

    Ok(PlaceRecord {
        id: result.last_insert_rowid(),
        country_id,
        region_id,
        district_id,
        city_id,
        user_id,
    })
}

pub async fn place_by_user(db: &Database, user_id: i64) -> Result<Option<PlaceRecord>, AppError> {
    let row = sqlx::query(
        "SELECT id, country_id, region_id, district_id, city_id, user_id
         FROM place WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    Ok(row.as_ref().map(row_to_place))
}

pub async fn list_places(db: &Database) -> Result<Vec<PlaceRecord>, AppError> {
    let rows = sqlx::query(
        "SELECT id, country_id, region_id, district_id, city_id, user_id FROM place ORDER BY id",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows.iter().map(row_to_place).collect())
}

pub async fn update_place_for_user(
    db: &Database,
    user_id: i64,
    country_id: Option<i64>,
    region_id: Option<i64>,
    district_id: Option<i64>,
    city_id: Option<i64>,
) -> Result<Option<PlaceRecord>, AppError> {
    let result = sqlx::query(
        "UPDATE place SET country_id = ?, region_id = ?, district_id = ?, city_id = ?
         WHERE user_id = ?",
    )
    .bind(country_id)
    .bind(region_id)
    .bind(district_id)
    .bind(city_id)
    .bind(user_id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    place_by_user(db, user_id).await
}
