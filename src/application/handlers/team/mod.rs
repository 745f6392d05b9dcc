//! Team and person management handlers.

mod create_team;
mod get_team;
mod set_person_active;

pub use create_team::{CreateTeamCommand, CreateTeamHandler, NewMember};
pub use get_team::{GetTeamHandler, GetTeamQuery};
pub use set_person_active::{SetPersonActiveCommand, SetPersonActiveHandler};
