//! Reviewer selection.
//!
//! Pure functions over a snapshot of team membership. Randomness comes from
//! the injected [`RandomSource`]; nothing here touches shared state.

use crate::domain::foundation::PersonId;
use crate::domain::team::Person;
use crate::ports::RandomSource;

use super::{ReviewerSet, MAX_REVIEWERS};

/// Picks up to two reviewers from the author's team.
///
/// The pool is every active member other than the author. Shuffle-and-take
/// makes every subset of size `min(2, pool)` equally likely. An empty pool
/// yields an empty set.
pub fn select_initial(
    author: &PersonId,
    members: &[Person],
    random: &dyn RandomSource,
) -> ReviewerSet {
    let mut pool = candidate_pool(members, |id| id != author);
    random.shuffle(&mut pool);
    pool.truncate(MAX_REVIEWERS);

    // pool holds distinct ids and at most MAX_REVIEWERS of them
    ReviewerSet::new(pool).unwrap_or_default()
}

/// Picks one replacement reviewer.
///
/// The pool is every active member that is neither the author nor already
/// a reviewer (the departing one included). Returns `None` when the pool is
/// empty.
pub fn select_replacement(
    author: &PersonId,
    current: &ReviewerSet,
    members: &[Person],
    random: &dyn RandomSource,
) -> Option<PersonId> {
    let mut pool = candidate_pool(members, |id| id != author && !current.contains(id));
    random.shuffle(&mut pool);
    pool.into_iter().next()
}

fn candidate_pool(members: &[Person], eligible: impl Fn(&PersonId) -> bool) -> Vec<PersonId> {
    let mut pool: Vec<PersonId> = Vec::with_capacity(members.len());
    for member in members {
        if member.is_active() && eligible(member.id()) && !pool.contains(member.id()) {
            pool.push(member.id().clone());
        }
    }
    pool
}
