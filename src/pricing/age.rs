//! Age-range weighting.
//!
//! The narrower the requested age band, the harder the panel is to fill, so
//! the ratio grows as the spread shrinks. Three base regimes apply: adults
//! (18-55) use the base band table, seniors (56-100) pay a flat 0.30 on top,
//! and minors (0-18) only have the narrow bands available, also offset by
//! 0.30. A band straddling both the youth and elder cutoffs is a flat 0.60;
//! any other combination falls back to 0.30.

/// Flat surcharge applied outside the adult regime.
const ELDER_OFFSET: f64 = 0.30;

/// Base band table: (spread_min, spread_max, ratio), narrowest last.
const SPREAD_BANDS: [(i64, i64, f64); 6] = [
    (31, 37, 0.00),
    (21, 30, 0.15),
    (16, 20, 0.30),
    (11, 15, 0.45),
    (6, 10, 0.75),
    (0, 5, 0.90),
];

/// Ratio for an age spread in the base (adult) regime; 0 outside the table.
fn spread_ratio(range: i64) -> f64 {
    for &(lo, hi, ratio) in &SPREAD_BANDS {
        if (lo..=hi).contains(&range) {
            return ratio;
        }
    }
    0.0
}

/// Compute the age weighting for an already-validated band (min <= max).
///
/// A bound of zero means "unset" upstream, so callers only reach this with
/// both bounds present and non-zero.
pub fn age_ratio(min_age: i64, max_age: i64) -> f64 {
    let range = max_age - min_age;

    if min_age >= 18 && max_age <= 55 {
        spread_ratio(range)
    } else if min_age >= 56 && max_age <= 100 {
        // Spreads of 38-44 fall outside the band table and still pay the
        // flat senior surcharge, matching the historical behavior.
        spread_ratio(range) + ELDER_OFFSET
    } else if min_age >= 0 && max_age <= 18 {
        // Only the narrow bands exist for minors; wider spreads contribute 0.
        if range <= 20 {
            spread_ratio(range) + ELDER_OFFSET
        } else {
            0.0
        }
    } else if min_age < 18 && max_age > 55 {
        0.60
    } else {
        0.30
    }
}
