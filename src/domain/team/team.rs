//! Team entity: a named set of people.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TeamName, ValidationError};

use super::Person;

/// A team and its membership at the time it was read.
///
/// # Invariants
///
/// - every member's team is this team
/// - no person appears twice
///
/// Membership order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: TeamName,
    members: Vec<Person>,
}

impl Team {
    /// Creates a team, validating membership.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a member belongs to another team or is listed twice
    pub fn new(name: TeamName, members: Vec<Person>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if member.team() != Some(&name) {
                return Err(ValidationError::invalid_format(
                    "members",
                    format!("{} does not belong to team {}", member.id(), name),
                ));
            }
            if !seen.insert(member.id().clone()) {
                return Err(ValidationError::invalid_format(
                    "members",
                    format!("{} is listed more than once", member.id()),
                ));
            }
        }
        Ok(Self { name, members })
    }

    /// Reconstitute a team from persistence (no validation).
    pub fn reconstitute(name: TeamName, members: Vec<Person>) -> Self {
        Self { name, members }
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn members(&self) -> &[Person] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PersonId;

    fn member(id: &str, team: &str) -> Person {
        Person::new(
            PersonId::new(id).unwrap(),
            id,
            Some(TeamName::new(team).unwrap()),
            true,
        )
    }

    #[test]
    fn accepts_members_of_the_same_team() {
        let team = Team::new(
            TeamName::new("backend").unwrap(),
            vec![member("u1", "backend"), member("u2", "backend")],
        )
        .unwrap();
        assert_eq!(team.members().len(), 2);
    }

    #[test]
    fn empty_team_is_valid() {
        let team = Team::new(TeamName::new("ghosts").unwrap(), vec![]).unwrap();
        assert!(team.is_empty());
    }

    #[test]
    fn rejects_member_of_another_team() {
        let result = Team::new(
            TeamName::new("backend").unwrap(),
            vec![member("u1", "frontend")],
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn rejects_duplicate_members() {
        let result = Team::new(
            TeamName::new("backend").unwrap(),
            vec![member("u1", "backend"), member("u1", "backend")],
        );
        assert!(result.is_err());
    }
}
