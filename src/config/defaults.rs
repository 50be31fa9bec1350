//! Default configuration values
//!
//! The stop identifiers and exclusion pairs record known-bad source data:
//! persons whose missing father must not be guessed, and candidates that
//! share a nomen with a subject but are documented as unrelated.

/// Minimum number of years between a guessed father's birth and the subject's
pub const MIN_GENERATION_GAP: i32 = 22;

/// First year of the first aggregation period
pub const START_YEAR: i32 = -600;

/// Deaths after this year are not aggregated
pub const FINAL_YEAR: i32 = 100;

/// Width of an aggregation period in years
pub const PERIOD_WIDTH: i32 = 25;

/// Persons born after this year are left out of family trees
pub const MAX_BIRTH_YEAR: i32 = -130;

/// Persons whose ancestry is never guessed
pub const STOP_IDS: [i64; 4] = [1095, 1032, 1235, 4695];

/// `(subject, candidate)` pairs never linked by a guess
pub const EXCLUSIONS: [(i64, i64); 10] = [
    (3264, 3957),
    (3264, 3956),
    (4453, 5311),
    (5297, 4116),
    (5297, 4118),
    (3788, 3573),
    (3349, 580),
    (3349, 624),
    (1235, 1032),
    (4026, 4093),
];

pub(crate) const fn min_generation_gap() -> i32 {
    MIN_GENERATION_GAP
}

pub(crate) fn stop_ids() -> Vec<i64> {
    STOP_IDS.to_vec()
}

pub(crate) fn exclusions() -> Vec<(i64, i64)> {
    EXCLUSIONS.to_vec()
}

pub(crate) const fn start_year() -> i32 {
    START_YEAR
}

pub(crate) const fn final_year() -> Option<i32> {
    Some(FINAL_YEAR)
}

pub(crate) const fn period_width() -> i32 {
    PERIOD_WIDTH
}

pub(crate) const fn max_birth_year() -> Option<i32> {
    Some(MAX_BIRTH_YEAR)
}
