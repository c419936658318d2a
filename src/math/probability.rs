//! Discrete probability distributions and information measures

use crate::io::error::{AnalysisError, Result, degenerate_distribution};
use crate::math::is_distribution;
use crate::math::sparse::SparseMap;
use num_traits::Float;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Shannon term `p * log2(p)`, with `0 * log2(0) = 0`
pub fn plogp<F: Float>(p: F) -> F {
    if p <= F::zero() { F::zero() } else { p * p.log2() }
}

/// Shannon entropy in bits of a sequence of probabilities
///
/// Zero probabilities contribute nothing.
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let sum: f64 = probabilities.into_iter().map(plogp::<f64>).sum();
    // Avoid reporting -0.0 for single-outcome distributions
    if sum == 0.0 { 0.0 } else { -sum }
}

/// Probability distribution over discrete keys
///
/// Keys are kept in ascending order so that sums are reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<K> {
    probabilities: BTreeMap<K, f64>,
}

impl<K: Ord + Clone + Debug> Distribution<K> {
    /// Normalize occurrence counts into a distribution
    ///
    /// # Errors
    ///
    /// Returns `DegenerateDistribution` if there are no occurrences
    pub fn from_counts(counts: &SparseMap<K, usize>) -> Result<Self> {
        let total = counts.total();
        if total == 0 {
            return Err(degenerate_distribution("empirical", &"no observations"));
        }
        let probabilities = counts
            .iter()
            .map(|(key, &count)| (key.clone(), count as f64 / total as f64))
            .collect();
        Ok(Self { probabilities })
    }

    /// Build a distribution from explicit probabilities
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a probability outside `[0, 1]` and
    /// `DegenerateDistribution` if the sum fails the tolerance check
    pub fn from_probabilities<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut probabilities = BTreeMap::new();
        for (key, p) in entries {
            if !(0.0..=1.0).contains(&p) {
                return Err(crate::io::error::invalid_parameter(
                    "probability",
                    &p,
                    &format!("must lie in [0, 1] for key {key:?}"),
                ));
            }
            *probabilities.entry(key).or_insert(0.0) += p;
        }
        if !is_distribution(probabilities.values()) {
            return Err(degenerate_distribution(
                "explicit",
                &format!("probabilities sum to {}", probabilities.values().sum::<f64>()),
            ));
        }
        Ok(Self { probabilities })
    }

    /// Wrap probabilities that were already checked by the caller
    pub(crate) const fn from_validated(probabilities: BTreeMap<K, f64>) -> Self {
        Self { probabilities }
    }

    /// Probability of a key, 0 when absent
    pub fn probability(&self, key: &K) -> f64 {
        self.probabilities.get(key).copied().unwrap_or(0.0)
    }

    /// Number of keys with stored probability
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Check whether no key has stored probability
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Keys and probabilities in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.probabilities.iter().map(|(key, &p)| (key, p))
    }

    /// Shannon entropy in bits
    pub fn entropy(&self) -> f64 {
        shannon_entropy(self.probabilities.values().copied())
    }

    /// Relative entropy `D(self || reference)` in bits
    ///
    /// Summed over the union of both key sets, an absent key having
    /// probability 0. Terms where `self` has zero probability contribute 0.
    ///
    /// # Errors
    ///
    /// Returns `DivergenceUndefined` if some key has positive probability
    /// here and zero probability in `reference`
    pub fn relative_entropy(&self, reference: &Self) -> Result<f64> {
        let mut divergence = 0.0;
        let keys = self.probabilities.keys().chain(
            reference
                .probabilities
                .keys()
                .filter(|key| !self.probabilities.contains_key(*key)),
        );
        for key in keys {
            let p = self.probability(key);
            let q = reference.probability(key);
            if p <= 0.0 {
                continue;
            }
            if q <= 0.0 {
                return Err(AnalysisError::DivergenceUndefined {
                    key: format!("{key:?}"),
                });
            }
            divergence += p * (p / q).log2();
        }
        Ok(divergence)
    }
}
