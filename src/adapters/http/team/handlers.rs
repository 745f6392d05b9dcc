//! HTTP handlers for team and user endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    handle_directory_error, handle_rejection, handle_validation_error,
};
use crate::application::handlers::team::{
    CreateTeamCommand, CreateTeamHandler, GetTeamHandler, GetTeamQuery, NewMember,
    SetPersonActiveCommand, SetPersonActiveHandler,
};
use crate::domain::foundation::{PersonId, TeamName, ValidationError};

use super::dto::{SetIsActiveRequest, TeamDto, TeamEnvelope, TeamQuery, UserEnvelope};

#[derive(Clone)]
pub struct TeamHandlers {
    create_handler: Arc<CreateTeamHandler>,
    get_handler: Arc<GetTeamHandler>,
    set_active_handler: Arc<SetPersonActiveHandler>,
}

impl TeamHandlers {
    pub fn new(
        create_handler: Arc<CreateTeamHandler>,
        get_handler: Arc<GetTeamHandler>,
        set_active_handler: Arc<SetPersonActiveHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            set_active_handler,
        }
    }
}

/// POST /team/add - Register a team and upsert its members
pub async fn create_team(
    State(handlers): State<TeamHandlers>,
    payload: Result<Json<TeamDto>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return handle_rejection(rejection),
    };
    let cmd = match to_command(req) {
        Ok(cmd) => cmd,
        Err(e) => return handle_validation_error(e),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(team) => {
            let response = TeamEnvelope {
                team: TeamDto::from(&team),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_directory_error(e),
    }
}

/// GET /team/get?team_name= - Team with its members
pub async fn get_team(
    State(handlers): State<TeamHandlers>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return handle_rejection(rejection),
    };
    let team_name = match TeamName::new(params.team_name) {
        Ok(name) => name,
        Err(e) => return handle_validation_error(e),
    };

    match handlers.get_handler.handle(GetTeamQuery { team_name }).await {
        Ok(team) => (StatusCode::OK, Json(TeamDto::from(&team))).into_response(),
        Err(e) => handle_directory_error(e),
    }
}

/// POST /users/setIsActive - Toggle reviewer eligibility
pub async fn set_is_active(
    State(handlers): State<TeamHandlers>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return handle_rejection(rejection),
    };
    let person_id = match PersonId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return handle_validation_error(e),
    };

    let cmd = SetPersonActiveCommand {
        person_id,
        active: req.is_active,
    };
    match handlers.set_active_handler.handle(cmd).await {
        Ok(person) => {
            let response = UserEnvelope {
                user: (&person).into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_directory_error(e),
    }
}

fn to_command(dto: TeamDto) -> Result<CreateTeamCommand, ValidationError> {
    let members = dto
        .members
        .into_iter()
        .map(|m| {
            Ok(NewMember {
                person_id: PersonId::new(m.user_id)?,
                display_name: m.username,
                active: m.is_active,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(CreateTeamCommand {
        team_name: TeamName::new(dto.team_name)?,
        members,
    })
}
