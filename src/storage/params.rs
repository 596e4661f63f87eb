//! Weighting-parameter queries.

use crate::error::AppError;
use crate::pricing::Parameter;
use crate::storage::Database;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn row_to_parameter(row: &SqliteRow) -> Parameter {
    Parameter {
        id: row.get("id"),
        name: row.get("name"),
        ratio: row.get("ratio"),
        category_id: row.get("category_id"),
    }
}

pub async fn create_parameter(
    db: &Database,
    name: &str,
    ratio: Option<f64>,
    category_id: Option<i64>,
) -> Result<Parameter, AppError> {
    let result = sqlx::query("INSERT INTO params (name, ratio, category_id) VALUES (?, ?, ?)")
        .bind(name)
        .bind(ratio)
        .bind(category_id)
        .execute(db.pool())
        .await?;

    Ok(Parameter {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        ratio,
        category_id,
    })
}

pub async fn list_parameters(db: &Database) -> Result<Vec<Parameter>, AppError> {
    let rows = sqlx::query("SELECT id, name, ratio, category_id FROM params ORDER BY id")
        .fetch_all(db.pool())
        .await?;

    Ok(rows.iter().map(row_to_parameter).collect())
}

pub async fn parameter_by_id(db: &Database, id: i64) -> Result<Option<Parameter>, AppError> {
    let row = sqlx::query("SELECT id, name, ratio, category_id FROM params WHERE id = ?")
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.as_ref().map(row_to_parameter))
}

pub async fn parameter_by_name(db: &Database, name: &str) -> Result<Option<Parameter>, AppError> {
    let row = sqlx::query("SELECT id, name, ratio, category_id FROM params WHERE name = ?")
        .bind(name)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.as_ref().map(row_to_parameter))
}

pub async fn parameters_by_category(
    db: &Database,
    category_id: i64,
) -> Result<Vec<Parameter>, AppError> {
    let rows =
        sqlx::query("SELECT id, name, ratio, category_id FROM params WHERE category_id = ? ORDER BY id")
            .bind(category_id)
            .fetch_all(db.pool())
            .await?;

    Ok(rows.iter().map(row_to_parameter).collect())
}

pub async fn update_parameter(
    db: &Database,
    id: i64,
    name: &str,
    ratio: Option<f64>,
    category_id: Option<i64>,
) -> Result<Option<Parameter>, AppError> {
    let result = sqlx::query("UPDATE params SET name = ?, ratio = ?, category_id = ? WHERE id = ?")
        .bind(name)
        .bind(ratio)
        .bind(category_id)
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Parameter { id, name: name.to_string(), ratio, category_id }))
}

pub async fn delete_parameter(db: &Database, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM params WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}
