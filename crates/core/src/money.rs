//! Minor-unit currency conversion.
//!
//! The external platform reports all amounts in the smallest currency
//! denomination (cents). Internal records store major-unit decimal
//! amounts, so every imported amount passes through [`minor_to_major`].

/// Number of minor units per major currency unit.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Convert an amount in minor units (cents) to a major-unit decimal.
///
/// `1250` becomes `12.50`.
pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / MINOR_UNITS_PER_MAJOR as f64
}

/// Convert an optional minor-unit amount, treating absence as zero.
///
/// Catalog items without variation-level pricing carry no price at all;
/// those import as 0, which is accepted behaviour rather than an error.
pub fn optional_minor_to_major(amount: Option<i64>) -> f64 {
    amount.map(minor_to_major).unwrap_or(0.0)
}
