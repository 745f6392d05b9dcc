//! The set of reviewers assigned to a review request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonId, ValidationError};

/// Maximum number of reviewers on a single request.
pub const MAX_REVIEWERS: usize = 2;

/// Zero, one or two distinct reviewers. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PersonId>", into = "Vec<PersonId>")]
pub struct ReviewerSet(Vec<PersonId>);

impl ReviewerSet {
    /// Builds a reviewer set.
    ///
    /// # Errors
    ///
    /// - `TooLong` if more than [`MAX_REVIEWERS`] ids are given
    /// - `InvalidFormat` if an id is repeated
    pub fn new(reviewers: Vec<PersonId>) -> Result<Self, ValidationError> {
        if reviewers.len() > MAX_REVIEWERS {
            return Err(ValidationError::too_long(
                "assigned_reviewers",
                MAX_REVIEWERS,
                reviewers.len(),
            ));
        }
        if reviewers.len() == 2 && reviewers[0] == reviewers[1] {
            return Err(ValidationError::invalid_format(
                "assigned_reviewers",
                format!("{} is assigned twice", reviewers[0]),
            ));
        }
        Ok(Self(reviewers))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PersonId] {
        &self.0
    }

    /// Swaps `old` for `new` in place, keeping the size.
    ///
    /// Returns false and leaves the set untouched when `old` is absent or
    /// `new` is already present.
    pub fn replace(&mut self, old: &PersonId, new: PersonId) -> bool {
        if self.contains(&new) {
            return false;
        }
        match self.0.iter_mut().find(|id| *id == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }
}

impl TryFrom<Vec<PersonId>> for ReviewerSet {
    type Error = ValidationError;

    fn try_from(value: Vec<PersonId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewerSet> for Vec<PersonId> {
    fn from(set: ReviewerSet) -> Self {
        set.0
    }
}
