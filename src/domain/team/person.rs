//! Person entity as seen by the review service.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonId, TeamName};

/// A directory entry. Only active people are eligible as reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    display_name: String,
    team: Option<TeamName>,
    active: bool,
}

impl Person {
    pub fn new(
        id: PersonId,
        display_name: impl Into<String>,
        team: Option<TeamName>,
        active: bool,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            team,
            active,
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The team this person belongs to, if any.
    pub fn team(&self) -> Option<&TeamName> {
        self.team.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns a copy with the active flag replaced.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
