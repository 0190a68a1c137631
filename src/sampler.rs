use std::sync::Arc;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::{error::AliasError, table::AliasTable};

/// An [`AliasTable`] paired with its own seeded generator.
///
/// The table is read-only and may be shared between samplers; the generator
/// is the only state a draw mutates, so each thread should own its sampler.
#[derive(Debug, Clone)]
pub struct AliasSampler<R = Pcg64> {
    table: Arc<AliasTable>,
    rng: R,
    seed: u64,
}

impl AliasSampler<Pcg64> {
    /// Build from weights with a seed taken from the thread-local,
    /// OS-seeded generator. Read it back with [`seed`](Self::seed).
    ///
    /// # Errors
    /// See [`AliasTable::new`].
    pub fn new(weights: &[f64]) -> Result<Self, AliasError> {
        Self::with_seed(weights, rand::random())
    }

    /// Build from weights with an explicit seed; equal weights and seeds
    /// give equal draw sequences.
    ///
    /// # Errors
    /// See [`AliasTable::new`].
    pub fn with_seed(weights: &[f64], seed: u64) -> Result<Self, AliasError> {
        let table = AliasTable::new(weights)?;
        Ok(Self::from_table(Arc::new(table), seed))
    }
}

impl<R: Rng + SeedableRng> AliasSampler<R> {
    /// Attach a fresh generator seeded with `seed` to an existing table.
    pub fn from_table(table: Arc<AliasTable>, seed: u64) -> Self {
        debug!("alias sampler over {} outcomes seeded with {seed}", table.len());
        Self {
            table,
            rng: R::seed_from_u64(seed),
            seed,
        }
    }
}

impl<R: Rng> AliasSampler<R> {
    /// Draw the next outcome index in `0..n`. O(1).
    #[inline]
    pub fn draw(&mut self) -> usize {
        self.table.sample_index(&mut self.rng)
    }

    /// Seed the generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Shared handle to the table, for spawning sibling samplers.
    pub fn shared_table(&self) -> Arc<AliasTable> {
        Arc::clone(&self.table)
    }

    /// Number of outcomes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.table.len()
    }
}

/// Endless stream of draws.
impl<R: Rng> Iterator for AliasSampler<R> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn deterministic_with_seed() {
        let weights = [0.5, 1.5, 3.0, 0.25];
        let a = AliasSampler::with_seed(&weights, 42).unwrap();
        let b = AliasSampler::with_seed(&weights, 42).unwrap();

        let da: Vec<usize> = a.take(1000).collect();
        let db: Vec<usize> = b.take(1000).collect();
        assert_eq!(da, db);
    }

    #[test]
    fn auto_seed_is_reproducible() {
        let weights = [1.0, 2.0, 3.0];
        let mut first = AliasSampler::new(&weights).unwrap();
        let mut replay = AliasSampler::with_seed(&weights, first.seed()).unwrap();
        for _ in 0..1000 {
            assert_eq!(first.draw(), replay.draw());
        }
    }

    #[test]
    fn rejects_empty_weights() {
        assert_eq!(AliasSampler::new(&[]).unwrap_err(), AliasError::Empty);
        assert_eq!(
            AliasSampler::with_seed(&[], 1).unwrap_err(),
            AliasError::Empty
        );
    }

    #[test]
    fn siblings_share_one_table() {
        let parent = AliasSampler::with_seed(&[1.0, 4.0], 9).unwrap();
        let sibling: AliasSampler = AliasSampler::from_table(parent.shared_table(), 10);

        assert!(std::ptr::eq(parent.table(), sibling.table()));
        assert_eq!(sibling.seed(), 10);
        assert_eq!(sibling.len(), 2);
    }

    #[test]
    fn accepts_other_generators() {
        let table = Arc::new(AliasTable::new(&[1.0, 1.0, 2.0]).unwrap());
        let mut a = AliasSampler::<StdRng>::from_table(Arc::clone(&table), 3);
        let mut b = AliasSampler::<StdRng>::from_table(table, 3);
        for _ in 0..100 {
            let i = a.draw();
            assert!(i < 3);
            assert_eq!(i, b.draw());
        }
    }
}
