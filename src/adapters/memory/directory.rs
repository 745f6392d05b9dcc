//! In-memory directory.
//!
//! Implements both `Directory` and `TeamRegistry` over a single lock so a
//! team registration is observed all at once. Useful for tests and local
//! runs without a database.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PersonId, TeamName};
use crate::domain::team::{Person, Team};
use crate::ports::{Directory, RegisterOutcome, TeamRegistry};

#[derive(Debug, Default)]
struct DirectoryState {
    teams: BTreeSet<TeamName>,
    people: BTreeMap<PersonId, Person>,
}

impl DirectoryState {
    fn register(&mut self, team: &Team) -> RegisterOutcome {
        if !self.teams.insert(team.name().clone()) {
            return RegisterOutcome::AlreadyExists;
        }
        for member in team.members() {
            self.people.insert(member.id().clone(), member.clone());
        }
        RegisterOutcome::Created
    }
}

/// Thread-safe in-memory directory. Does not persist across restarts.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with the given teams.
    ///
    /// Later teams win if a person appears in more than one.
    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        let mut state = DirectoryState::default();
        for team in teams {
            state.register(&team);
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn get_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        Ok(self.state.read().await.people.get(id).cloned())
    }

    async fn get_team(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
        let state = self.state.read().await;
        if !state.teams.contains(name) {
            return Ok(None);
        }
        let members = state
            .people
            .values()
            .filter(|p| p.team() == Some(name))
            .cloned()
            .collect();
        Ok(Some(Team::reconstitute(name.clone(), members)))
    }
}

#[async_trait]
impl TeamRegistry for InMemoryDirectory {
    async fn create_team(&self, team: &Team) -> Result<RegisterOutcome, DomainError> {
        Ok(self.state.write().await.register(team))
    }

    async fn set_active(
        &self,
        id: &PersonId,
        active: bool,
    ) -> Result<Option<Person>, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.people.get_mut(id).map(|person| {
            *person = person.clone().with_active(active);
            person.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PersonId {
        PersonId::new(s).unwrap()
    }

    fn team(name: &str, members: &[(&str, bool)]) -> Team {
        let team_name = TeamName::new(name).unwrap();
        Team::new(
            team_name.clone(),
            members
                .iter()
                .map(|(id, active)| Person::new(pid(id), *id, Some(team_name.clone()), *active))
                .collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn registered_team_is_readable() {
        let directory = InMemoryDirectory::new();
        let outcome = directory
            .create_team(&team("backend", &[("u1", true), ("u2", false)]))
            .await
            .unwrap();
        assert_eq!(outcome, RegisterOutcome::Created);

        let found = directory
            .get_team(&TeamName::new("backend").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.members().len(), 2);
        assert!(directory.get_person(&pid("u2")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_team_is_rejected_without_changes() {
        let directory = InMemoryDirectory::with_teams([team("backend", &[("u1", true)])]);
        let outcome = directory
            .create_team(&team("backend", &[("u9", true)]))
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::AlreadyExists);
        assert!(directory.get_person(&pid("u9")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn member_moves_to_newly_registered_team() {
        let directory = InMemoryDirectory::with_teams([team("backend", &[("u1", true)])]);
        directory
            .create_team(&team("frontend", &[("u1", false)]))
            .await
            .unwrap();

        let backend = directory
            .get_team(&TeamName::new("backend").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(backend.is_empty());

        let person = directory.get_person(&pid("u1")).await.unwrap().unwrap();
        assert_eq!(person.team().map(|t| t.as_str()), Some("frontend"));
        assert!(!person.is_active());
    }

    #[tokio::test]
    async fn unknown_team_is_none() {
        let directory = InMemoryDirectory::new();
        let team = directory
            .get_team(&TeamName::new("nobody").unwrap())
            .await
            .unwrap();
        assert!(team.is_none());
    }

    #[tokio::test]
    async fn set_active_updates_flag() {
        let directory = InMemoryDirectory::with_teams([team("backend", &[("u1", true)])]);
        let updated = directory.set_active(&pid("u1"), false).await.unwrap().unwrap();
        assert!(!updated.is_active());
        assert!(directory.set_active(&pid("ghost"), true).await.unwrap().is_none());
    }
}
