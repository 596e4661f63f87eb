//! Cost quotation for a survey run.
//!
//! `compute_cost` maps the requested panel size, optional time/target
//! weighting parameters and an optional age band into a single monetary
//! multiplier, then scales by the panel size:
//!
//! `cost = (3.2 + bracket + time + target + age) * user_amount`
//!
//! Reference ratios come from an injected [`ParameterLookup`] store; the
//! engine holds no state of its own.

use crate::config::LookupMode;
use crate::error::AppError;
use crate::pricing::age::age_ratio;
use crate::pricing::brackets::classify_amount;
use serde::{Deserialize, Serialize};

/// Fixed base multiplier every quote starts from.
const BASE_RATIO: f64 = 3.2;

/// A weighting parameter row as the engine sees it.
///
/// `ratio` is nullable in storage; a missing value contributes 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: i64,
    pub name: String,
    pub ratio: Option<f64>,
    pub category_id: Option<i64>,
}

/// Read-only parameter store the engine depends on.
pub trait ParameterLookup {
    fn parameter_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Parameter>, AppError>> + Send;

    fn parameter_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Parameter>, AppError>> + Send;
}

/// Inputs to a quote, mirroring the calculateCost endpoint.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub user_amount: i64,
    pub time_params_id: Option<i64>,
    pub target_params_id: Option<i64>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}

/// A computed quote plus any soft lookup misses encountered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub cost: f64,
    pub warnings: Vec<String>,
}

/// Compute a cost quote.
///
/// Validation failures (negative amount, inverted age bounds) reject the
/// request before any lookup. Missing reference rows contribute a zero ratio
/// in lenient mode and fail with [`AppError::NotFound`] in strict mode.
pub async fn compute_cost<S: ParameterLookup + Sync>(
    store: &S,
    mode: LookupMode,
    request: &QuoteRequest,
) -> Result<Quote, AppError> {
    if request.user_amount < 0 {
        return Err(AppError::Validation(format!(
            "userAmount must be non-negative, got {}",
            request.user_amount
        )));
    }

    let age_band = validate_age_band(request.min_age, request.max_age)?;

    // Counts beyond u32 territory land in the open-ended top bracket anyway.
    let bracket_label =
        classify_amount(u32::try_from(request.user_amount).unwrap_or(u32::MAX));

    // The three reference lookups are independent; issue them concurrently.
    let (bracket_param, time_param, target_param) = tokio::try_join!(
        store.parameter_by_name(bracket_label),
        lookup_optional(store, request.time_params_id),
        lookup_optional(store, request.target_params_id),
    )?;

    let mut warnings = Vec::new();

    let user_group_ratio = resolve_ratio(
        bracket_param,
        mode,
        &mut warnings,
        || format!("no weighting parameter named '{}'", bracket_label),
    )?;

    let time_group_ratio = match request.time_params_id {
        Some(id) => resolve_ratio(time_param, mode, &mut warnings, || {
            format!("time parameter {} not found", id)
        })?,
        None => 0.0,
    };

    let target_group_ratio = match request.target_params_id {
        Some(id) => resolve_ratio(target_param, mode, &mut warnings, || {
            format!("target parameter {} not found", id)
        })?,
        None => 0.0,
    };

    let age_group_ratio = match age_band {
        Some((min_age, max_age)) => age_ratio(min_age, max_age),
        None => 0.0,
    };

    let multiplier =
        BASE_RATIO + user_group_ratio + time_group_ratio + target_group_ratio + age_group_ratio;
    let cost = multiplier * request.user_amount as f64;

    tracing::debug!(
        amount = request.user_amount,
        bracket = bracket_label,
        user_group_ratio,
        time_group_ratio,
        target_group_ratio,
        age_group_ratio,
        cost,
        "computed quote"
    );
    metrics::counter!("panel_quotes_total").increment(1);

    Ok(Quote { cost, warnings })
}

/// Check the optional age band. A bound of zero counts as unset, matching the
/// endpoint's historical sentinel; inverted bounds are a hard error.
fn validate_age_band(
    min_age: Option<i64>,
    max_age: Option<i64>,
) -> Result<Option<(i64, i64)>, AppError> {
    match (min_age, max_age) {
        (Some(min), Some(max)) if min != 0 && max != 0 => {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_age {} exceeds max_age {}",
                    min, max
                )));
            }
            if min < 0 {
                return Err(AppError::Validation(format!(
                    "min_age must be non-negative, got {}",
                    min
                )));
            }
            Ok(Some((min, max)))
        }
        _ => Ok(None),
    }
}

async fn lookup_optional<S: ParameterLookup>(
    store: &S,
    id: Option<i64>,
) -> Result<Option<Parameter>, AppError> {
    match id {
        Some(id) => store.parameter_by_id(id).await,
        None => Ok(None),
    }
}

/// Turn an optional parameter row into its ratio contribution.
///
/// A found row with a NULL ratio reads as 0 in both modes; a missing row is a
/// warning (lenient) or a NotFound error (strict).
fn resolve_ratio(
    param: Option<Parameter>,
    mode: LookupMode,
    warnings: &mut Vec<String>,
    describe: impl FnOnce() -> String,
) -> Result<f64, AppError> {
    match param {
        Some(param) => Ok(param.ratio.unwrap_or(0.0)),
        None => {
            let message = describe();
            if mode == LookupMode::Strict {
                return Err(AppError::NotFound(message));
            }
            tracing::warn!("{}; contributing 0 to the quote", message);
            warnings.push(message);
            Ok(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory store for engine tests.
    #[derive(Default)]
    struct FakeStore {
        by_name: HashMap<String, Parameter>,
        by_id: HashMap<i64, Parameter>,
    }

    impl FakeStore {
        fn with_bracket(mut self, name: &str, ratio: f64) -> Self {
            let id = self.by_name.len() as i64 + 1000;
            self.by_name.insert(
                name.to_string(),
                Parameter { id, name: name.to_string(), ratio: Some(ratio), category_id: None },
            );
            self
        }

        fn with_param(mut self, id: i64, ratio: Option<f64>) -> Self {
            self.by_id.insert(
                id,
                Parameter { id, name: format!("param-{}", id), ratio, category_id: None },
            );
            self
        }
    }

    impl ParameterLookup for FakeStore {
        async fn parameter_by_name(&self, name: &str) -> Result<Option<Parameter>, AppError> {
            Ok(self.by_name.get(name).cloned())
        }

        async fn parameter_by_id(&self, id: i64) -> Result<Option<Parameter>, AppError> {
            Ok(self.by_id.get(&id).cloned())
        }
    }

    #[tokio::test]
    async fn test_bracket_only_quote() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest { user_amount: 100, ..Default::default() };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        assert_eq!(quote.cost, (3.2 + 0.5) * 100.0);
        assert!(quote.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_documented_scenario() {
        // amount 150 (bracket ratio 0.5), ages 20-50 => spread 30 => 0.15
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest {
            user_amount: 150,
            min_age: Some(20),
            max_age: Some(50),
            ..Default::default()
        };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        assert!((quote.cost - 577.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_all_ratios_aggregate() {
        let store = FakeStore::default()
            .with_bracket("201-400", 0.4)
            .with_param(7, Some(0.2))
            .with_param(8, Some(0.1));
        let request = QuoteRequest {
            user_amount: 300,
            time_params_id: Some(7),
            target_params_id: Some(8),
            min_age: Some(30),
            max_age: Some(35),
        };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        // 3.2 + 0.4 + 0.2 + 0.1 + 0.9 = 4.8
        assert!((quote.cost - 4.8 * 300.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_time_param_is_soft_in_lenient_mode() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest {
            user_amount: 100,
            time_params_id: Some(9999),
            ..Default::default()
        };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        assert_eq!(quote.cost, (3.2 + 0.5) * 100.0);
        assert_eq!(quote.warnings.len(), 1);
        assert!(quote.warnings[0].contains("9999"));
    }

    #[tokio::test]
    async fn test_missing_param_fails_in_strict_mode() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest {
            user_amount: 100,
            time_params_id: Some(9999),
            ..Default::default()
        };
        let err = compute_cost(&store, LookupMode::Strict, &request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_null_ratio_reads_as_zero() {
        let store = FakeStore::default()
            .with_bracket("up to 200", 0.5)
            .with_param(3, None);
        let request = QuoteRequest {
            user_amount: 100,
            target_params_id: Some(3),
            ..Default::default()
        };
        let quote = compute_cost(&store, LookupMode::Strict, &request).await.unwrap();
        assert_eq!(quote.cost, (3.2 + 0.5) * 100.0);
        assert!(quote.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_negative_amount_rejected_before_lookup() {
        let store = FakeStore::default();
        let request = QuoteRequest { user_amount: -1, ..Default::default() };
        let err = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_inverted_age_band_rejected() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest {
            user_amount: 100,
            min_age: Some(50),
            max_age: Some(20),
            ..Default::default()
        };
        let err = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_zero_age_bound_means_unset() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest {
            user_amount: 100,
            min_age: Some(0),
            max_age: Some(40),
            ..Default::default()
        };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        assert_eq!(quote.cost, (3.2 + 0.5) * 100.0);
    }

    #[tokio::test]
    async fn test_zero_amount_quotes_zero() {
        let store = FakeStore::default().with_bracket("up to 200", 0.5);
        let request = QuoteRequest { user_amount: 0, ..Default::default() };
        let quote = compute_cost(&store, LookupMode::Lenient, &request).await.unwrap();
        assert_eq!(quote.cost, 0.0);
    }
}
