//! Compiles a typed condition list into a parameterized respondent count.
//!
//! This is the only place filter semantics meet SQL; the builder itself never
//! sees a query string. The place table is joined only when a location
//! condition is present, which does not change the AND semantics of the
//! remaining conditions.

use crate::error::AppError;
use crate::filter::Condition;
use crate::storage::Database;

enum BindValue {
    Int(i64),
    Text(String),
}

pub async fn count_users(db: &Database, conditions: &[Condition]) -> Result<i64, AppError> {
    let mut sql = String::from("SELECT COUNT(*) FROM users");

    if conditions.iter().any(|c| c.needs_place_join()) {
        sql.push_str(" JOIN place ON place.user_id = users.id");
    }

    let mut clauses: Vec<String> = Vec::new();
    let mut bindings: Vec<BindValue> = Vec::new();

    for condition in conditions {
        match condition {
            Condition::PlaceEq { field, id } => {
                clauses.push(format!("place.{} = ?", field.column()));
                bindings.push(BindValue::Int(*id));
            }
            Condition::GenderEq(gender) => {
                clauses.push("users.gender = ?".to_string());
                bindings.push(BindValue::Text(gender.as_str().to_string()));
            }
            Condition::AgeBetween { min, max } => {
                clauses.push("users.age BETWEEN ? AND ?".to_string());
                bindings.push(BindValue::Int(*min));
                bindings.push(BindValue::Int(*max));
            }
            Condition::PurchaseCategoryEq(id) => {
                clauses.push("users.purchase_category_id = ?".to_string());
                bindings.push(BindValue::Int(*id));
            }
            Condition::PurchaseFrequencyEq(id) => {
                clauses.push("users.purchase_frequency_id = ?".to_string());
                bindings.push(BindValue::Int(*id));
            }
            Condition::IncomeBetween { min, max } => {
                clauses.push("users.income BETWEEN ? AND ?".to_string());
                bindings.push(BindValue::Int(*min));
                bindings.push(BindValue::Int(*max));
            }
            Condition::FinancialSituationEq(situation) => {
                clauses.push("users.financial_situation = ?".to_string());
                bindings.push(BindValue::Text(situation.clone()));
            }
            Condition::FamilySituationEq(situation) => {
                clauses.push("users.family_situation = ?".to_string());
                bindings.push(BindValue::Text(situation.as_str().to_string()));
            }
        }
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for binding in &bindings {
        query = match binding {
            BindValue::Int(value) => query.bind(*value),
            BindValue::Text(value) => query.bind(value.clone()),
        };
    }

    let total = query.fetch_one(db.pool()).await?;
    Ok(total)
}
