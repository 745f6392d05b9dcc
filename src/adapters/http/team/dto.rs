//! HTTP DTOs for team and user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::team::{Person, Team};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// Team with members; used both for registration and for reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDto {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberDto>,
}

impl From<&Team> for TeamDto {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.name().to_string(),
            members: team
                .members()
                .iter()
                .map(|p| TeamMemberDto {
                    user_id: p.id().to_string(),
                    username: p.display_name().to_string(),
                    is_active: p.is_active(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamEnvelope {
    pub team: TeamDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamQuery {
    pub team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

impl From<&Person> for UserResponse {
    fn from(person: &Person) -> Self {
        Self {
            user_id: person.id().to_string(),
            username: person.display_name().to_string(),
            team_name: person.team().map(|t| t.to_string()),
            is_active: person.is_active(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}
