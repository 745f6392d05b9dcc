//! Team registry port (write side of the directory).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::team::{Person, Team};

/// Result of registering a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Team and members were stored.
    Created,
    /// A team with this name already exists; nothing was written.
    AlreadyExists,
}

/// Directory management operations.
#[async_trait]
pub trait TeamRegistry: Send + Sync {
    /// Register a team and upsert its members in one transaction.
    ///
    /// A member that already exists moves to this team and takes the given
    /// display name and active flag.
    async fn create_team(&self, team: &Team) -> Result<RegisterOutcome, DomainError>;

    /// Set a person's active flag.
    ///
    /// Returns the updated person, or `None` if not found.
    async fn set_active(
        &self,
        id: &PersonId,
        active: bool,
    ) -> Result<Option<Person>, DomainError>;
}
