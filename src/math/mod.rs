//! Mathematical utilities for the statistics

/// Discrete distributions, Shannon entropy and relative entropy
pub mod probability;
/// Sparse map with an explicit default value
pub mod sparse;

use crate::io::configuration::DISTRIBUTION_TOLERANCE;

/// Check that probabilities sum to 1 within the distribution tolerance
///
/// Deliberately loose: it catches missing or doubled mass, not rounding.
pub fn is_distribution<'a, I>(probabilities: I) -> bool
where
    I: IntoIterator<Item = &'a f64>,
{
    let total: f64 = probabilities.into_iter().sum();
    (1.0 - total).abs() < DISTRIBUTION_TOLERANCE
}
