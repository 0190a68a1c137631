//! Vose's construction of the alias table, and the O(1) draw against it.

use crate::error::AliasError;
use log::{debug, trace};
use rand::Rng;
use rand::distr::Distribution;

/// Immutable `probability`/`alias` column pair built from a weight vector.
///
/// Column `i` returns outcome `i` when the coin toss lands under
/// `probability[i]`, otherwise `alias[i]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TableParts")
)]
pub struct AliasTable {
    probability: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build a table from non-negative, unnormalized weights. O(n).
    ///
    /// # Errors
    /// * [`AliasError::Empty`] if `weights` is empty.
    /// * [`AliasError::InvalidWeight`] for the first negative, `NaN` or infinite weight.
    /// * [`AliasError::InvalidTotal`] if the weights sum to zero or overflow.
    pub fn new(weights: &[f64]) -> Result<Self, AliasError> {
        let n = weights.len();
        if n == 0 {
            return Err(AliasError::Empty);
        }

        let mut total = 0.0f64;
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(AliasError::InvalidWeight { index, value });
            }
            total += value;
        }
        if !total.is_finite() || total == 0.0 {
            return Err(AliasError::InvalidTotal { total });
        }
        debug!("building alias table: n={n} total={total}");

        let mut scaled: Vec<f64> = weights.iter().map(|&w| w / total).collect();
        let average = 1.0 / n as f64;

        let mut probability = vec![0.0f64; n];
        let mut alias = vec![0usize; n];

        let mut small = Vec::with_capacity(n);
        let mut large = Vec::with_capacity(n);

        // Exactly-average entries count as large.
        for (i, &p) in scaled.iter().enumerate() {
            if p >= average {
                large.push(i);
            } else {
                small.push(i);
            }
        }

        // Rounding may empty either list first, so both are checked.
        while let (Some(&less), Some(&more)) = (small.last(), large.last()) {
            small.pop();
            large.pop();

            probability[less] = scaled[less] * n as f64;
            alias[less] = more;

            scaled[more] = (scaled[more] + scaled[less]) - average;

            if scaled[more] >= average {
                large.push(more);
            } else {
                small.push(more);
            }
        }

        // Whatever is left holds (numerically) exactly 1/n.
        for i in small.into_iter().chain(large) {
            trace!("column {i} left unpaired with residual {}", scaled[i]);
            probability[i] = 1.0;
            alias[i] = i;
        }

        Ok(Self { probability, alias })
    }

    /// Rebuild a table from previously extracted columns.
    ///
    /// # Errors
    /// * [`AliasError::Empty`] if both columns are empty.
    /// * [`AliasError::Malformed`] if the columns differ in length, a cutoff
    ///   falls outside `[0, 1]`, or an alias points past the last column.
    pub fn from_parts(probability: Vec<f64>, alias: Vec<usize>) -> Result<Self, AliasError> {
        if probability.len() != alias.len() {
            return Err(AliasError::Malformed {
                reason: "probability and alias columns differ in length",
            });
        }
        if probability.is_empty() {
            return Err(AliasError::Empty);
        }
        if !probability.iter().all(|p| (0.0..=1.0).contains(p)) {
            return Err(AliasError::Malformed {
                reason: "cutoff outside [0, 1]",
            });
        }
        let n = alias.len();
        if alias.iter().any(|&a| a >= n) {
            return Err(AliasError::Malformed {
                reason: "alias target out of range",
            });
        }
        Ok(Self { probability, alias })
    }

    /// Draw a single outcome in O(1): one column pick, one biased coin toss.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let column = rng.random_range(0..self.probability.len());
        let toss: f64 = rng.random();
        if toss < self.probability[column] {
            column
        } else {
            self.alias[column]
        }
    }

    /// Per-column cutoffs.
    pub fn probabilities(&self) -> &[f64] {
        &self.probability
    }

    /// Per-column fallback outcomes.
    pub fn aliases(&self) -> &[usize] {
        &self.alias
    }

    /// Total mass the table routes to each outcome, own column plus every
    /// column aliasing to it. Matches the normalized input weights up to
    /// rounding.
    pub fn outcome_probabilities(&self) -> Vec<f64> {
        let n = self.len() as f64;
        let mut mass = vec![0.0f64; self.len()];
        for (column, (&p, &a)) in self.probability.iter().zip(&self.alias).enumerate() {
            mass[column] += p / n;
            mass[a] += (1.0 - p) / n;
        }
        mass
    }

    pub fn len(&self) -> usize {
        self.probability.len()
    }
    pub fn is_empty(&self) -> bool {
        self.probability.is_empty()
    }

    /// Draw `draws` samples, returning counts per outcome.
    #[cfg(test)]
    pub(crate) fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.len()];
        for _ in 0..draws {
            counts[self.sample_index(rng)] += 1;
        }
        counts
    }
}

impl Distribution<usize> for AliasTable {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_index(rng)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TableParts {
    probability: Vec<f64>,
    alias: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<TableParts> for AliasTable {
    type Error = AliasError;

    fn try_from(parts: TableParts) -> Result<Self, Self::Error> {
        AliasTable::from_parts(parts.probability, parts.alias)
    }
}
