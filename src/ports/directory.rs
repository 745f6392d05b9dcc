//! Directory port (read side).
//!
//! Resolves people by id and teams by name. The review engine never writes
//! through this port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId, TeamName};
use crate::domain::team::{Person, Team};

/// Read-only view of people and team membership.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Find a person by id.
    ///
    /// Returns `None` if not found.
    async fn get_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError>;

    /// Find a team by name, with all of its members (active or not).
    ///
    /// Returns `None` if the team does not exist. A team without members
    /// is returned as an empty team.
    async fn get_team(&self, name: &TeamName) -> Result<Option<Team>, DomainError>;
}
