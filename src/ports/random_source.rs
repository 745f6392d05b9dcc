//! Randomness port for reviewer selection.
//!
//! Selection never touches a process-global generator. Production wiring
//! uses a thread-local generator; tests inject a seeded one so that the
//! chosen reviewers are reproducible.

use crate::domain::foundation::PersonId;

/// Source of uniformly random permutations.
pub trait RandomSource: Send + Sync {
    /// Reorders `ids` into a uniformly random permutation.
    fn shuffle(&self, ids: &mut [PersonId]);
}
