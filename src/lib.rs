//! # vose_alias
//!
//! O(1) sampling from a fixed discrete distribution.
//!
//! This crate builds alias tables with
//! [Vose's construction](http://www.keithschwarz.com/darts-dice-coins/) of
//! the [alias method](https://en.wikipedia.org/wiki/Alias_method): O(n) to
//! preprocess a weight vector, then one column pick plus one biased coin toss
//! per draw.
//!
//! There are three layers:
//!
//! 1. [`AliasTable`]: the immutable `probability`/`alias` columns. Draw from it
//!    with any generator you already own; it is a `rand` [`Distribution`](rand::distr::Distribution).
//! 2. [`AliasSampler`]: a table plus its own seeded generator. Seeds are
//!    explicit (or picked for you and readable afterwards), so runs replay.
//! 3. [`WeightedTable`]: maps drawn indices back to your own items.
//!
//! ## Quick start
//!
//! ```rust
//! use vose_alias::AliasSampler;
//!
//! # fn main() -> Result<(), vose_alias::AliasError> {
//! let mut die = AliasSampler::with_seed(&[1.0, 1.0, 1.0, 1.0, 1.0, 5.0], 7)?;
//! let roll = die.draw(); // 5 comes up half the time
//! assert!(roll < 6);
//! # Ok(()) }
//! ```
//!
//! ## Items
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//! use vose_alias::WeightedTable;
//!
//! # fn main() -> Result<(), vose_alias::AliasError> {
//! let table = WeightedTable::from_pairs([("GET", 80.0), ("PUT", 15.0), ("DELETE", 5.0)])?;
//! let mut rng = Pcg32::seed_from_u64(1);
//! let verb = table.sample(&mut rng); // &&str
//! assert!(table.items().contains(verb));
//! # Ok(()) }
//! ```
//!
//! ## Performance
//! * **Build**: O(n) time and space.
//! * **Sample**: O(1) per draw (2 random numbers, 1 branch).
//! * **Space**: 2 vectors of length `n` (f64 + usize).
//!
//! ## Gotchas
//! * Weights must be **finite** and **non-negative**, with a positive finite sum.
//! * Distributions are *fixed*. If weights change, build a new table.
//! * A sampler's generator is unsynchronized. Share the table across threads
//!   with [`AliasSampler::shared_table`] and give every thread its own sampler.
//!
//! ## Features
//! * `serde`: `Serialize`/`Deserialize` for [`AliasTable`]. Deserialization
//!   re-validates the columns through [`AliasTable::from_parts`].

mod error;
mod sampler;
mod table;

pub use error::AliasError;
pub use sampler::AliasSampler;
pub use table::AliasTable;

use rand::Rng;

/// Associates items with weights and samples them through an internal
/// [`AliasTable`].
///
/// Build it from any iterator of `(item, weight)` where `weight >= 0`.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    table: AliasTable,
    items: Vec<T>,
}

impl<T> WeightedTable<T> {
    /// Build from any `(item, weight)` iterator.
    ///
    /// # Errors
    /// * [`AliasError::Empty`] if there are no items.
    /// * [`AliasError::InvalidWeight`] if a weight is negative or not finite.
    /// * [`AliasError::InvalidTotal`] if the sum of weights is zero or not finite.
    ///
    /// # Complexity
    /// O(n) time / O(n) space.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (items, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        let table = AliasTable::new(&weights)?;
        Ok(Self { table, items })
    }

    /// Sample an item **by reference** (no `Clone` bound).
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        &self.items[self.table.sample_index(rng)]
    }

    /// Sample an item **by value** (clones the chosen element).
    ///
    /// Prefer [`sample`](Self::sample) if you don’t need ownership.
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.sample(rng).clone()
    }

    /// Items in input order; index `i` is outcome `i` of [`table`](Self::table).
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn smoke_pairs() {
        let wt = WeightedTable::from_pairs([("a", 1.0), ("b", 3.0)]).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let got = wt.sample(&mut rng);
        assert!(["a", "b"].contains(got));
        assert_eq!(wt.len(), 2);
    }

    #[test]
    fn zero_weight_items_stay_put() {
        let wt = WeightedTable::from_pairs([
            (String::from("never"), 0.0),
            (String::from("always"), 2.0),
        ])
        .unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            assert_eq!(wt.sample_owned(&mut rng), "always");
        }
    }

    #[test]
    fn empty_pairs_are_rejected() {
        let pairs: Vec<(char, f64)> = Vec::new();
        assert!(matches!(
            WeightedTable::from_pairs(pairs),
            Err(AliasError::Empty)
        ));
    }
}
