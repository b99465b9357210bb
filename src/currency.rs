//! Fixed-point helpers for currency amounts.
//!
//! Amounts live in the dataset as decimal `f64` values but every equality
//! check and aggregate runs on integral minor units, so two sums that should
//! match never diverge by a rounding ulp.

const MINOR_UNITS_PER_UNIT: f64 = 100.0;

/// Converts a decimal amount to minor units (cents), rounded to the nearest.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * MINOR_UNITS_PER_UNIT).round() as i64
}

/// Converts minor units back to a decimal amount.
pub fn from_minor_units(minor: i64) -> f64 {
    minor as f64 / MINOR_UNITS_PER_UNIT
}
