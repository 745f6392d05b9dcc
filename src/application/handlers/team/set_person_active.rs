//! SetPersonActiveHandler - Command handler for toggling reviewer eligibility.
//!
//! Deactivating someone does not touch requests they already review.

use std::sync::Arc;

use crate::domain::foundation::PersonId;
use crate::domain::team::{DirectoryError, Person};
use crate::ports::TeamRegistry;

#[derive(Debug, Clone)]
pub struct SetPersonActiveCommand {
    pub person_id: PersonId,
    pub active: bool,
}

pub struct SetPersonActiveHandler {
    registry: Arc<dyn TeamRegistry>,
}

impl SetPersonActiveHandler {
    pub fn new(registry: Arc<dyn TeamRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: SetPersonActiveCommand) -> Result<Person, DirectoryError> {
        let person = self
            .registry
            .set_active(&cmd.person_id, cmd.active)
            .await
            .map_err(|e| DirectoryError::infrastructure("updating person", e))?
            .ok_or_else(|| DirectoryError::not_found("user", &cmd.person_id))?;

        tracing::info!(person_id = %cmd.person_id, active = cmd.active, "person activity changed");
        Ok(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDirectory;
    use crate::domain::foundation::{ErrorCode, TeamName};
    use crate::domain::team::Team;

    #[tokio::test]
    async fn toggles_flag() {
        let name = TeamName::new("core").unwrap();
        let id = PersonId::new("u1").unwrap();
        let team = Team::new(
            name.clone(),
            vec![Person::new(id.clone(), "Ada", Some(name), true)],
        )
        .unwrap();
        let handler = SetPersonActiveHandler::new(Arc::new(InMemoryDirectory::with_teams([team])));

        let person = handler
            .handle(SetPersonActiveCommand {
                person_id: id,
                active: false,
            })
            .await
            .unwrap();
        assert!(!person.is_active());
        assert_eq!(person.display_name(), "Ada");
    }

    #[tokio::test]
    async fn unknown_person_is_not_found() {
        let handler = SetPersonActiveHandler::new(Arc::new(InMemoryDirectory::new()));
        let err = handler
            .handle(SetPersonActiveCommand {
                person_id: PersonId::new("ghost").unwrap(),
                active: true,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
