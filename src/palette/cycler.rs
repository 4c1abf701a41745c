//! Non-repeating random palette selection.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::{AppError, AppResult};

/// Picks catalog indices at random without repeating any index until every
/// index of the catalog has been shown once; then a new cycle starts.
#[derive(Debug)]
pub struct PaletteCycler {
    shown: HashSet<usize>,
    rng: SmallRng,
}

impl Default for PaletteCycler {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteCycler {
    pub fn new() -> Self {
        Self {
            shown: HashSet::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic cycler for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            shown: HashSet::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of indices already shown in the current cycle.
    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    /// Forgets the current cycle.
    pub fn reset(&mut self) {
        self.shown.clear();
    }

    /// Returns the next index in `0..catalog_size`.
    pub fn next(&mut self, catalog_size: usize) -> AppResult<usize> {
        if catalog_size == 0 {
            return Err(AppError::EmptyCatalog);
        }

        // The catalog may have shrunk since the cycle began.
        self.shown.retain(|&i| i < catalog_size);
        if self.shown.len() >= catalog_size {
            self.shown.clear();
        }

        let available: Vec<usize> = (0..catalog_size)
            .filter(|i| !self.shown.contains(i))
            .collect();
        let index = *available
            .choose(&mut self.rng)
            .ok_or(AppError::EmptyCatalog)?;

        self.shown.insert(index);
        Ok(index)
    }
}
