//! PostgreSQL implementation of Directory and TeamRegistry.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, PersonId, TeamName};
use crate::domain::team::{Person, Team};
use crate::ports::{Directory, RegisterOutcome, TeamRegistry};

use super::{corrupt_row, is_unique_violation, query_failed};

/// PostgreSQL-backed directory of teams and people.
#[derive(Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PostgresDirectory {
    async fn get_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT person_id, display_name, team_name, is_active
            FROM people
            WHERE person_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("fetch person", e))?;

        row.as_ref().map(row_to_person).transpose()
    }

    async fn get_team(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
        // One row per member, or a single row of NULLs for an empty team.
        let rows = sqlx::query(
            r#"
            SELECT p.person_id, p.display_name, p.team_name, p.is_active
            FROM teams t
            LEFT JOIN people p ON p.team_name = t.team_name
            WHERE t.team_name = $1
            ORDER BY p.person_id
            "#,
        )
        .bind(name.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch team", e))?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut members = Vec::with_capacity(rows.len());
        for row in &rows {
            let person_id: Option<String> = row
                .try_get("person_id")
                .map_err(|e| corrupt_row("person_id", e))?;
            if person_id.is_some() {
                members.push(row_to_person(row)?);
            }
        }

        Ok(Some(Team::reconstitute(name.clone(), members)))
    }
}

#[async_trait]
impl TeamRegistry for PostgresDirectory {
    async fn create_team(&self, team: &Team) -> Result<RegisterOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("begin transaction", e))?;

        let inserted = sqlx::query("INSERT INTO teams (team_name) VALUES ($1)")
            .bind(team.name().as_str())
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            // dropping tx rolls back
            Err(e) if is_unique_violation(&e) => return Ok(RegisterOutcome::AlreadyExists),
            Err(e) => return Err(query_failed("insert team", e)),
        }

        for member in team.members() {
            sqlx::query(
                r#"
                INSERT INTO people (person_id, display_name, team_name, is_active)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (person_id) DO UPDATE SET
                    display_name = EXCLUDED.display_name,
                    team_name = EXCLUDED.team_name,
                    is_active = EXCLUDED.is_active
                "#,
            )
            .bind(member.id().as_str())
            .bind(member.display_name())
            .bind(team.name().as_str())
            .bind(member.is_active())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("upsert team member", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| query_failed("commit transaction", e))?;

        Ok(RegisterOutcome::Created)
    }

    async fn set_active(
        &self,
        id: &PersonId,
        active: bool,
    ) -> Result<Option<Person>, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE people SET is_active = $2
            WHERE person_id = $1
            RETURNING person_id, display_name, team_name, is_active
            "#,
        )
        .bind(id.as_str())
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("update person", e))?;

        row.as_ref().map(row_to_person).transpose()
    }
}

fn row_to_person(row: &PgRow) -> Result<Person, DomainError> {
    let id: String = row
        .try_get("person_id")
        .map_err(|e| corrupt_row("person_id", e))?;
    let display_name: String = row
        .try_get("display_name")
        .map_err(|e| corrupt_row("display_name", e))?;
    let team: Option<String> = row
        .try_get("team_name")
        .map_err(|e| corrupt_row("team_name", e))?;
    let active: bool = row
        .try_get("is_active")
        .map_err(|e| corrupt_row("is_active", e))?;

    let id = PersonId::new(id).map_err(|e| corrupt_row("person_id", e))?;
    let team = team
        .map(TeamName::new)
        .transpose()
        .map_err(|e| corrupt_row("team_name", e))?;

    Ok(Person::new(id, display_name, team, active))
}
