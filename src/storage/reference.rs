//! Reference-table queries: categories, purchase categories/frequencies,
//! income brackets and family situations.
//!
//! Most of these tables are a bare id/name pair, so the CRUD is shared and
//! parameterized by table name (static identifiers only, never user input).

use crate::error::AppError;
use crate::filter::NamedRow;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use sqlx::Row;

async fn create_named(db: &Database, table: &'static str, name: &str) -> Result<NamedRow, AppError> {
    let result = sqlx::query(&format!("INSERT INTO {} (name) VALUES (?)", table))
        .bind(name)
        .execute(db.pool())
        .await?;

    Ok(NamedRow { id: result.last_insert_rowid(), name: name.to_string() })
}

async fn list_named(db: &Database, table: &'static str) -> Result<Vec<NamedRow>, AppError> {
    let rows = sqlx::query(&format!("SELECT id, name FROM {} ORDER BY id", table))
        .fetch_all(db.pool())
        .await?;

    Ok(rows
        .iter()
        .map(|row| NamedRow { id: row.get("id"), name: row.get("name") })
        .collect())
}

async fn named_by_id(db: &Database, table: &'static str, id: i64) -> Result<Option<NamedRow>, AppError> {
    let row = sqlx::query(&format!("SELECT id, name FROM {} WHERE id = ?", table))
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.map(|row| NamedRow { id: row.get("id"), name: row.get("name") }))
}

async fn update_named(
    db: &Database,
    table: &'static str,
    id: i64,
    name: &str,
) -> Result<Option<NamedRow>, AppError> {
    let result = sqlx::query(&format!("UPDATE {} SET name = ? WHERE id = ?", table))
        .bind(name)
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(NamedRow { id, name: name.to_string() }))
}

async fn delete_named(db: &Database, table: &'static str, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
        .bind(id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}

// Categories (weighting-parameter groups)

pub async fn create_category(db: &Database, name: &str) -> Result<NamedRow, AppError> {
    create_named(db, "categories", name).await
}

pub async fn list_categories(db: &Database) -> Result<Vec<NamedRow>, AppError> {
    list_named(db, "categories").await
}

pub async fn category_by_id(db: &Database, id: i64) -> Result<Option<NamedRow>, AppError> {
    named_by_id(db, "categories", id).await
}

pub async fn update_category(db: &Database, id: i64, name: &str) -> Result<Option<NamedRow>, AppError> {
    update_named(db, "categories", id, name).await
}

pub async fn delete_category(db: &Database, id: i64) -> Result<bool, AppError> {
    delete_named(db, "categories", id).await
}

// Income brackets

pub async fn create_income(db: &Database, name: &str) -> Result<NamedRow, AppError> {
    create_named(db, "income", name).await
}

pub async fn list_income(db: &Database) -> Result<Vec<NamedRow>, AppError> {
    list_named(db, "income").await
}

pub async fn income_by_id(db: &Database, id: i64) -> Result<Option<NamedRow>, AppError> {
    named_by_id(db, "income", id).await
}

pub async fn update_income(db: &Database, id: i64, name: &str) -> Result<Option<NamedRow>, AppError> {
    update_named(db, "income", id, name).await
}

pub async fn delete_income(db: &Database, id: i64) -> Result<bool, AppError> {
    delete_named(db, "income", id).await
}

// Family situations

pub async fn create_family_situation(db: &Database, name: &str) -> Result<NamedRow, AppError> {
    create_named(db, "family_situation", name).await
}

pub async fn list_family_situations(db: &Database) -> Result<Vec<NamedRow>, AppError> {
    list_named(db, "family_situation").await
}

pub async fn family_situation_by_id(db: &Database, id: i64) -> Result<Option<NamedRow>, AppError> {
    named_by_id(db, "family_situation", id).await
}

pub async fn update_family_situation(
    db: &Database,
    id: i64,
    name: &str,
) -> Result<Option<NamedRow>, AppError> {
    update_named(db, "family_situation", id, name).await
}

pub async fn delete_family_situation(db: &Database, id: i64) -> Result<bool, AppError> {
    delete_named(db, "family_situation", id).await
}

// Purchase categories

pub async fn create_purchase_category(db: &Database, name: &str) -> Result<NamedRow, AppError> {
    create_named(db, "purchase_category", name).await
}

pub async fn list_purchase_categories(db: &Database) -> Result<Vec<NamedRow>, AppError> {
    list_named(db, "purchase_category").await
}

pub async fn purchase_category_by_id(db: &Database, id: i64) -> Result<Option<NamedRow>, AppError> {
    named_by_id(db, "purchase_category", id).await
}

pub async fn update_purchase_category(
    db: &Database,
    id: i64,
    name: &str,
) -> Result<Option<NamedRow>, AppError> {
    update_named(db, "purchase_category", id, name).await
}

pub async fn delete_purchase_category(db: &Database, id: i64) -> Result<bool, AppError> {
    delete_named(db, "purchase_category", id).await
}

// Purchase frequencies (scoped to a purchase category)

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseFrequency {
    pub id: i64,
    pub name: String,
    pub purchase_category_id: Option<i64>,
}

pub async fn create_purchase_frequency(
    db: &Database,
    name: &str,
    purchase_category_id: Option<i64>,
) -> Result<PurchaseFrequency, AppError> {
    let result =
        sqlx::query("INSERT INTO purchase_frequency (name, purchase_category_id) VALUES (?, ?)")
            .bind(name)
            .bind(purchase_category_id)
            .execute(db.pool())
            .await?;

    Ok(PurchaseFrequency {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        purchase_category_id,
    })
}

pub async fn list_purchase_frequencies(db: &Database) -> Result<Vec<PurchaseFrequency>, AppError> {
    let rows =
        sqlx::query("SELECT id, name, purchase_category_id FROM purchase_frequency ORDER BY id")
            .fetch_all(db.pool())
            .await?;

    Ok(rows
        .iter()
        .map(|row| PurchaseFrequency {
            id: row.get("id"),
            name: row.get("name"),
            purchase_category_id: row.get("purchase_category_id"),
        })
        .collect())
}

pub async fn purchase_frequencies_by_category(
    db: &Database,
    purchase_category_id: i64,
) -> Result<Vec<PurchaseFrequency>, AppError> {
    let rows = sqlx::query(
        "SELECT id, name, purchase_category_id FROM purchase_frequency
         WHERE purchase_category_id = ? ORDER BY id",
    )
    .bind(purchase_category_id)
    .fetch_all(db.pool())
    .await?;

    Ok(rows
        .iter()
        .map(|row| PurchaseFrequency {
            id: row.get("id"),
            name: row.get("name"),
            purchase_category_id: row.get("purchase_category_id"),
        })
        .collect())
}

pub async fn purchase_frequency_by_id(
    db: &Database,
    id: i64,
) -> Result<Option<PurchaseFrequency>, AppError> {
    let row = sqlx::query("SELECT id, name, purchase_category_id FROM purchase_frequency WHERE id = ?")
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.map(|row| PurchaseFrequency {
        id: row.get("id"),
        name: row.get("name"),
        purchase_category_id: row.get("purchase_category_id"),
    }))
}

pub async fn update_purchase_frequency(
    db: &Database,
    id: i64,
    name: &str,
    purchase_category_id: Option<i64>,
) -> Result<Option<PurchaseFrequency>, AppError> {
    let result =
        sqlx::query("UPDATE purchase_frequency SET name = ?, purchase_category_id = ? WHERE id = ?")
            .bind(name)
            .bind(purchase_category_id)
            .bind(id)
            .execute(db.pool())
            .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(PurchaseFrequency { id, name: name.to_string(), purchase_category_id }))
}

pub async fn delete_purchase_frequency(db: &Database, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM purchase_frequency WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}
