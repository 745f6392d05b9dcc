//! RandomSource adapters.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::foundation::PersonId;
use crate::ports::RandomSource;

/// Thread-local generator, seeded from the OS. Used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl ThreadRandomSource {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandomSource {
    fn shuffle(&self, ids: &mut [PersonId]) {
        ids.shuffle(&mut rand::thread_rng());
    }
}

/// Deterministic generator for reproducible selection.
///
/// Two sources built from the same seed produce the same sequence of
/// permutations for the same inputs.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn shuffle(&self, ids: &mut [PersonId]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        ids.shuffle(&mut *rng);
    }
}
