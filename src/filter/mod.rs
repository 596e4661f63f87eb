//! Respondent filter builder.
//!
//! Turns a partially-filled set of demographic criteria into a list of typed
//! [`Condition`]s combined with AND. The storage adapter compiles the list
//! into a parameterized count query; nothing here speaks SQL. Income and
//! family-situation ids are resolved through an injected [`ReferenceLookup`]
//! store before they become conditions.

use crate::config::LookupMode;
use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Respondent gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized value '{0}'")]
pub struct ParseEnumError(pub String);

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Gender dimension of the criteria; "Both" on the wire means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderFilter {
    #[default]
    Any,
    Only(Gender),
}

/// Financial-situation dimension; "Any" on the wire means unconstrained.
/// The stored values are free-form labels, so the constrained variant keeps
/// the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FinancialFilter {
    #[default]
    Any,
    Is(String),
}

/// Closed family-situation vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySituation {
    Single,
    Married,
    Divorced,
    Widow,
}

impl FromStr for FamilySituation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(Self::Single),
            "Married" => Ok(Self::Married),
            "Divorced" => Ok(Self::Divorced),
            "Widow" => Ok(Self::Widow),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl FamilySituation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married",
            Self::Divorced => "Divorced",
            Self::Widow => "Widow",
        }
    }
}

impl fmt::Display for FamilySituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive age band; construction enforces ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: i64,
    max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Result<Self, AppError> {
        if min > max {
            return Err(AppError::Validation(format!(
                "age_min {} exceeds age_max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

/// Caller-supplied filter dimensions; absent fields constrain nothing.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub country_id: Option<i64>,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub city_id: Option<i64>,
    pub gender: GenderFilter,
    pub age: Option<AgeRange>,
    pub purchase_category_id: Option<i64>,
    pub purchase_frequency_id: Option<i64>,
    pub income_id: Option<i64>,
    pub financial_situation: FinancialFilter,
    pub family_situation_id: Option<i64>,
}

/// Location dimension a place condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceField {
    Country,
    Region,
    District,
    City,
}

impl PlaceField {
    /// Column on the place table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Country => "country_id",
            Self::Region => "region_id",
            Self::District => "district_id",
            Self::City => "city_id",
        }
    }
}

/// One AND-conjunct of the respondent predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    PlaceEq { field: PlaceField, id: i64 },
    GenderEq(Gender),
    AgeBetween { min: i64, max: i64 },
    PurchaseCategoryEq(i64),
    PurchaseFrequencyEq(i64),
    IncomeBetween { min: i64, max: i64 },
    FinancialSituationEq(String),
    FamilySituationEq(FamilySituation),
}

impl Condition {
    /// Whether evaluating this condition requires joining the place table.
    pub fn needs_place_join(&self) -> bool {
        matches!(self, Self::PlaceEq { .. })
    }
}

/// An id/name reference row (income bracket or family situation).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}

/// Read-only reference store the filter builder depends on.
pub trait ReferenceLookup {
    fn income_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<NamedRow>, AppError>> + Send;

    fn family_situation_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<NamedRow>, AppError>> + Send;
}

/// Fixed mapping from income bracket names to numeric monthly income ranges.
const INCOME_BRACKETS: [(&str, i64, i64); 3] = [
    ("1 000 000 - 2 000 000", 1_000_000, 2_000_000),
    ("2 100 000 - 4 000 000", 2_100_000, 4_000_000),
    ("4 100 000 - 6 000 000", 4_100_000, 6_000_000),
];

/// Numeric range for an income bracket name, if recognized.
pub fn income_range(name: &str) -> Option<(i64, i64)> {
    INCOME_BRACKETS
        .iter()
        .find(|(label, _, _)| *label == name)
        .map(|&(_, min, max)| (min, max))
}

/// Build the condition list for a criteria set.
///
/// Reference ids that fail to resolve (or resolve to an unrecognized name)
/// add no condition in lenient mode; strict mode fails the request instead.
/// Returns the conditions alongside any soft-miss warnings.
pub async fn build_conditions<S: ReferenceLookup + Sync>(
    store: &S,
    mode: LookupMode,
    criteria: &Criteria,
) -> Result<(Vec<Condition>, Vec<String>), AppError> {
    let mut conditions = Vec::new();
    let mut warnings = Vec::new();

    for (field, id) in [
        (PlaceField::Country, criteria.country_id),
        (PlaceField::Region, criteria.region_id),
        (PlaceField::District, criteria.district_id),
        (PlaceField::City, criteria.city_id),
    ] {
        if let Some(id) = id {
            conditions.push(Condition::PlaceEq { field, id });
        }
    }

    if let GenderFilter::Only(gender) = criteria.gender {
        conditions.push(Condition::GenderEq(gender));
    }

    if let Some(age) = criteria.age {
        conditions.push(Condition::AgeBetween { min: age.min(), max: age.max() });
    }

    // Frequency only applies alongside a category.
    if let Some(category_id) = criteria.purchase_category_id {
        conditions.push(Condition::PurchaseCategoryEq(category_id));
        if let Some(frequency_id) = criteria.purchase_frequency_id {
            conditions.push(Condition::PurchaseFrequencyEq(frequency_id));
        }
    }

    if let Some(income_id) = criteria.income_id {
        match store.income_by_id(income_id).await? {
            Some(row) => match income_range(&row.name) {
                Some((min, max)) => conditions.push(Condition::IncomeBetween { min, max }),
                None => soft_miss(
                    mode,
                    &mut warnings,
                    format!("income bracket '{}' has no numeric range", row.name),
                )?,
            },
            None => soft_miss(
                mode,
                &mut warnings,
                format!("income bracket {} not found", income_id),
            )?,
        }
    }

    if let FinancialFilter::Is(situation) = &criteria.financial_situation {
        conditions.push(Condition::FinancialSituationEq(situation.clone()));
    }

    if let Some(family_id) = criteria.family_situation_id {
        match store.family_situation_by_id(family_id).await? {
            Some(row) => match row.name.parse::<FamilySituation>() {
                Ok(situation) => conditions.push(Condition::FamilySituationEq(situation)),
                Err(_) => soft_miss(
                    mode,
                    &mut warnings,
                    format!("family situation '{}' is outside the known set", row.name),
                )?,
            },
            None => soft_miss(
                mode,
                &mut warnings,
                format!("family situation {} not found", family_id),
            )?,
        }
    }

    Ok((conditions, warnings))
}

fn soft_miss(mode: LookupMode, warnings: &mut Vec<String>, message: String) -> Result<(), AppError> {
    if mode == LookupMode::Strict {
        return Err(AppError::NotFound(message));
    }
    tracing::warn!("{}; dropping the condition", message);
    warnings.push(message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeRefs {
        incomes: Vec<NamedRow>,
        families: Vec<NamedRow>,
    }

    impl FakeRefs {
        fn seeded() -> Self {
            Self {
                incomes: vec![
                    NamedRow { id: 1, name: "1 000 000 - 2 000 000".into() },
                    NamedRow { id: 2, name: "2 100 000 - 4 000 000".into() },
                    NamedRow { id: 9, name: "retired scale".into() },
                ],
                families: vec![
                    NamedRow { id: 1, name: "Single".into() },
                    NamedRow { id: 2, name: "Married".into() },
                    NamedRow { id: 5, name: "Partnered".into() },
                ],
            }
        }
    }

    impl ReferenceLookup for FakeRefs {
        async fn income_by_id(&self, id: i64) -> Result<Option<NamedRow>, AppError> {
            Ok(self.incomes.iter().find(|r| r.id == id).cloned())
        }

        async fn family_situation_by_id(&self, id: i64) -> Result<Option<NamedRow>, AppError> {
            Ok(self.families.iter().find(|r| r.id == id).cloned())
        }
    }

    #[tokio::test]
    async fn test_empty_criteria_builds_no_conditions() {
        let refs = FakeRefs::seeded();
        let (conditions, warnings) =
            build_conditions(&refs, LookupMode::Lenient, &Criteria::default()).await.unwrap();
        assert!(conditions.is_empty());
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn test_family_situation_resolves_to_equality() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria { family_situation_id: Some(2), ..Default::default() };
        let (conditions, _) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert_eq!(conditions, vec![Condition::FamilySituationEq(FamilySituation::Married)]);
    }

    #[tokio::test]
    async fn test_income_id_resolves_to_range() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria { income_id: Some(2), ..Default::default() };
        let (conditions, _) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert_eq!(
            conditions,
            vec![Condition::IncomeBetween { min: 2_100_000, max: 4_000_000 }]
        );
    }

    #[tokio::test]
    async fn test_unknown_income_name_is_dropped_with_warning() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria { income_id: Some(9), ..Default::default() };
        let (conditions, warnings) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert!(conditions.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_family_id_fails_in_strict_mode() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria { family_situation_id: Some(99), ..Default::default() };
        let err = build_conditions(&refs, LookupMode::Strict, &criteria).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_frequency_requires_category() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria { purchase_frequency_id: Some(4), ..Default::default() };
        let (conditions, _) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert!(conditions.is_empty());

        let criteria = Criteria {
            purchase_category_id: Some(3),
            purchase_frequency_id: Some(4),
            ..Default::default()
        };
        let (conditions, _) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert_eq!(
            conditions,
            vec![Condition::PurchaseCategoryEq(3), Condition::PurchaseFrequencyEq(4)]
        );
    }

    #[tokio::test]
    async fn test_location_conditions_request_the_join() {
        let refs = FakeRefs::seeded();
        let criteria = Criteria {
            city_id: Some(12),
            gender: GenderFilter::Only(Gender::Female),
            ..Default::default()
        };
        let (conditions, _) =
            build_conditions(&refs, LookupMode::Lenient, &criteria).await.unwrap();
        assert!(conditions.iter().any(|c| c.needs_place_join()));
        assert!(conditions.contains(&Condition::GenderEq(Gender::Female)));
    }

    #[test]
    fn test_age_range_rejects_inverted_bounds() {
        assert!(AgeRange::new(40, 20).is_err());
        assert!(AgeRange::new(20, 40).is_ok());
    }

    #[test]
    fn test_income_table_is_closed() {
        assert_eq!(income_range("1 000 000 - 2 000 000"), Some((1_000_000, 2_000_000)));
        assert_eq!(income_range("4 100 000 - 6 000 000"), Some((4_100_000, 6_000_000)));
        assert_eq!(income_range("6 000 000+"), None);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert!("Both".parse::<Gender>().is_err());
        assert_eq!("Widow".parse::<FamilySituation>().unwrap(), FamilySituation::Widow);
        assert!("Partnered".parse::<FamilySituation>().is_err());
    }
}
