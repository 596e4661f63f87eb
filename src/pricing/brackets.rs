//! Respondent-count bracket classification.
//!
//! The bracket table is the canonical resolution of the historical label
//! mismatch around 901-1300: the numeric cutoffs are authoritative, so the
//! sixth bracket is 1101-1300 (not "1001-1300"). Brackets are contiguous and
//! exhaustive over non-negative counts, so classification is a total function.

/// One contiguous amount bracket. `upper` is inclusive; `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountBracket {
    pub lower: u32,
    pub upper: Option<u32>,
    pub label: &'static str,
}

/// Fixed bracket table, ordered by lower bound.
pub const AMOUNT_BRACKETS: [AmountBracket; 13] = [
    AmountBracket { lower: 0, upper: Some(200), label: "up to 200" },
    AmountBracket { lower: 201, upper: Some(400), label: "201-400" },
    AmountBracket { lower: 401, upper: Some(600), label: "401-600" },
    AmountBracket { lower: 601, upper: Some(900), label: "601-900" },
    AmountBracket { lower: 901, upper: Some(1100), label: "901-1100" },
    AmountBracket { lower: 1101, upper: Some(1300), label: "1101-1300" },
    AmountBracket { lower: 1301, upper: Some(1600), label: "1301-1600" },
    AmountBracket { lower: 1601, upper: Some(2000), label: "1601-2000" },
    AmountBracket { lower: 2001, upper: Some(2500), label: "2001-2500" },
    AmountBracket { lower: 2501, upper: Some(3000), label: "2501-3000" },
    AmountBracket { lower: 3001, upper: Some(3500), label: "3001-3500" },
    AmountBracket { lower: 3501, upper: Some(4000), label: "3501-4000" },
    AmountBracket { lower: 4001, upper: None, label: "4001+" },
];

/// Classify a non-negative respondent count into its bracket label.
pub fn classify_amount(amount: u32) -> &'static str {
    for bracket in &AMOUNT_BRACKETS {
        let above_lower = amount >= bracket.lower;
        let below_upper = bracket.upper.map_or(true, |upper| amount <= upper);
        if above_lower && below_upper {
            return bracket.label;
        }
    }
    // Unreachable: the last bracket is open-ended.
    AMOUNT_BRACKETS[AMOUNT_BRACKETS.len() - 1].label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_are_contiguous_and_ordered() {
        for pair in AMOUNT_BRACKETS.windows(2) {
            let upper = pair[0].upper.expect("only the last bracket is open-ended");
            assert_eq!(pair[1].lower, upper + 1, "gap or overlap after '{}'", pair[0].label);
        }
        assert_eq!(AMOUNT_BRACKETS[0].lower, 0);
        assert!(AMOUNT_BRACKETS.last().unwrap().upper.is_none());
    }

    #[test]
    fn test_classification_is_total() {
        // Every count up to well past the open bracket maps to exactly one label.
        for amount in 0..=5000u32 {
            let label = classify_amount(amount);
            let matching = AMOUNT_BRACKETS
                .iter()
                .filter(|b| amount >= b.lower && b.upper.map_or(true, |u| amount <= u))
                .count();
            assert_eq!(matching, 1, "amount {} matched {} brackets", amount, matching);
            assert!(!label.is_empty());
        }
    }

    #[test]
    fn test_boundary_labels() {
        assert_eq!(classify_amount(0), "up to 200");
        assert_eq!(classify_amount(200), "up to 200");
        assert_eq!(classify_amount(201), "201-400");
        assert_eq!(classify_amount(1000), "901-1100");
        assert_eq!(classify_amount(1100), "901-1100");
        assert_eq!(classify_amount(1101), "1101-1300");
        assert_eq!(classify_amount(4000), "3501-4000");
        assert_eq!(classify_amount(4001), "4001+");
        assert_eq!(classify_amount(1_000_000), "4001+");
    }
}
