//! CreateTeamHandler - Command handler for registering a team with its members.

use std::sync::Arc;

use crate::domain::foundation::{PersonId, TeamName};
use crate::domain::team::{DirectoryError, Person, Team};
use crate::ports::{RegisterOutcome, TeamRegistry};

/// One member in a team registration.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub person_id: PersonId,
    pub display_name: String,
    pub active: bool,
}

/// Command to register a team.
///
/// Members that already exist elsewhere move to this team.
#[derive(Debug, Clone)]
pub struct CreateTeamCommand {
    pub team_name: TeamName,
    pub members: Vec<NewMember>,
}

pub struct CreateTeamHandler {
    registry: Arc<dyn TeamRegistry>,
}

impl CreateTeamHandler {
    pub fn new(registry: Arc<dyn TeamRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: CreateTeamCommand) -> Result<Team, DirectoryError> {
        let members = cmd
            .members
            .into_iter()
            .map(|m| Person::new(m.person_id, m.display_name, Some(cmd.team_name.clone()), m.active))
            .collect();
        let team = Team::new(cmd.team_name, members)?;

        match self
            .registry
            .create_team(&team)
            .await
            .map_err(|e| DirectoryError::infrastructure("registering team", e))?
        {
            RegisterOutcome::Created => {
                tracing::info!(
                    team = %team.name(),
                    members = team.members().len(),
                    "team registered"
                );
                Ok(team)
            }
            RegisterOutcome::AlreadyExists => {
                tracing::warn!(team = %team.name(), "team already exists");
                Err(DirectoryError::team_exists(team.name()))
            }
        }
    }
}
