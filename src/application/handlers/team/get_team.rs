//! GetTeamHandler - Query handler for a team and its members.

use std::sync::Arc;

use crate::domain::foundation::TeamName;
use crate::domain::team::{DirectoryError, Team};
use crate::ports::Directory;

#[derive(Debug, Clone)]
pub struct GetTeamQuery {
    pub team_name: TeamName,
}

pub struct GetTeamHandler {
    directory: Arc<dyn Directory>,
}

impl GetTeamHandler {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: GetTeamQuery) -> Result<Team, DirectoryError> {
        self.directory
            .get_team(&query.team_name)
            .await
            .map_err(|e| DirectoryError::infrastructure("loading team", e))?
            .ok_or_else(|| DirectoryError::not_found("team", &query.team_name))
    }
}
