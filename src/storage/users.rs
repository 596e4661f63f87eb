//! Respondent ("user") record queries.

use crate::error::AppError;
use crate::storage::Database;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub purchase_category_id: Option<i64>,
    pub purchase_frequency_id: Option<i64>,
    pub income: Option<i64>,
    pub financial_situation: Option<String>,
    pub family_situation: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Fields accepted on create; also the patch shape for partial updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub purchase_category_id: Option<i64>,
    pub purchase_frequency_id: Option<i64>,
    pub income: Option<i64>,
    pub financial_situation: Option<String>,
    pub family_situation: Option<String>,
}

fn row_to_user(row: &SqliteRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        age: row.get("age"),
        gender: row.get("gender"),
        purchase_category_id: row.get("purchase_category_id"),
        purchase_frequency_id: row.get("purchase_frequency_id"),
        income: row.get("income"),
        financial_situation: row.get("financial_situation"),
        family_situation: row.get("family_situation"),
        created_at: row.get("created_at"),
    }
}

const USER_COLUMNS: &str = "id, name, age, gender, purchase_category_id, purchase_frequency_id, \
                            income, financial_situation, family_situation, created_at";

pub async fn create_user(db: &Database, user: &UserPatch) -> Result<UserRecord, AppError> {
    let name = user
        .name
        .as_deref()
        .ok_or_else(|| AppError::Validation("user name is required".to_string()))?;

    let result = sqlx::query(
        "INSERT INTO users (name, age, gender, purchase_category_id, purchase_frequency_id,
                            income, financial_situation, family_situation)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(user.age)
    .bind(&user.gender)
    .bind(user.purchase_category_id)
    .bind(user.purchase_frequency_id)
    .bind(user.income)
    .bind(&user.financial_situation)
    .bind(&user.family_situation)
    .execute(db.pool())
    .await?;

    let id = result.last_insert_rowid();
    user_by_id(db, id).await?.ok_or_else(|| {
        AppError::Internal(format!("user {} vanished immediately after insert", id))
    })
}

pub async fn list_users(db: &Database) -> Result<Vec<UserRecord>, AppError> {
    let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
        .fetch_all(db.pool())
        .await?;

    Ok(rows.iter().map(row_to_user).collect())
}

pub async fn user_by_id(db: &Database, id: i64) -> Result<Option<UserRecord>, AppError> {
    let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.as_ref().map(row_to_user))
}

/// Partial update: absent patch fields keep their stored values.
pub async fn update_user(
    db: &Database,
    id: i64,
    patch: &UserPatch,
) -> Result<Option<UserRecord>, AppError> {
    let Some(existing) = user_by_id(db, id).await? else {
        return Ok(None);
    };

    let merged = UserRecord {
        id,
        name: patch.name.clone().unwrap_or(existing.name),
        age: patch.age.or(existing.age),
        gender: patch.gender.clone().or(existing.gender),
        purchase_category_id: patch.purchase_category_id.or(existing.purchase_category_id),
        purchase_frequency_id: patch.purchase_frequency_id.or(existing.purchase_frequency_id),
        income: patch.income.or(existing.income),
        financial_situation: patch.financial_situation.clone().or(existing.financial_situation),
        family_situation: patch.family_situation.clone().or(existing.family_situation),
        created_at: existing.created_at,
    };

    sqlx::query(
        "UPDATE users SET name = ?, age = ?, gender = ?, purchase_category_id = ?,
                          purchase_frequency_id = ?, income = ?, financial_situation = ?,
                          family_situation = ?
         WHERE id = ?",
    )
    .bind(&merged.name)
    .bind(merged.age)
    .bind(&merged.gender)
    .bind(merged.purchase_category_id)
    .bind(merged.purchase_frequency_id)
    .bind(merged.income)
    .bind(&merged.financial_situation)
    .bind(&merged.family_situation)
    .bind(id)
    .execute(db.pool())
    .await?;

    Ok(Some(merged))
}

pub async fn delete_user(db: &Database, id: i64) -> Result<bool, AppError> {
    // The place link goes first so no orphan row survives.
    sqlx::query("DELETE FROM place WHERE user_id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}
