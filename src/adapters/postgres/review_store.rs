//! PostgreSQL implementation of ReviewRequestStore.
//!
//! A request lives in `review_requests`; each assigned reviewer is one row
//! of `review_assignments`. Every write the lifecycle relies on for
//! correctness is a single conditional statement or a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, PersonId, ReviewRequestId, Timestamp};
use crate::domain::review::{ReviewRequest, ReviewStatus, ReviewerSet};
use crate::ports::{CloseOutcome, CreateOutcome, ReviewRequestStore, SubstituteOutcome};

use super::{corrupt_row, is_unique_violation, query_failed};

const SELECT_REQUEST: &str = r#"
    SELECT r.request_id, r.title, r.author_id, r.status, r.created_at, r.closed_at,
           COALESCE(
               array_agg(a.person_id ORDER BY a.person_id) FILTER (WHERE a.person_id IS NOT NULL),
               '{}'
           ) AS reviewers
    FROM review_requests r
    LEFT JOIN review_assignments a ON a.request_id = r.request_id
"#;

/// PostgreSQL-backed review request store.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &ReviewRequestId) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM review_requests WHERE request_id = $1)")
                .bind(id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| query_failed("check review request existence", e))?;
        Ok(exists)
    }
}

/// Swaps `$2` for `$3` on request `$1` while it is still `$4` (OPEN).
///
/// The request row is share-locked, so a concurrent close waits for the
/// swap to commit, and a swap that queued behind a close sees CLOSED and
/// touches nothing.
const SUBSTITUTE_REVIEWER: &str = r#"
    WITH open_request AS (
        SELECT request_id FROM review_requests
        WHERE request_id = $1 AND status = $4
        FOR SHARE
    )
    UPDATE review_assignments a SET person_id = $3
    FROM open_request o
    WHERE a.request_id = o.request_id
      AND a.person_id = $2
"#;

#[async_trait]
impl ReviewRequestStore for PostgresReviewStore {
    async fn get(&self, id: &ReviewRequestId) -> Result<Option<ReviewRequest>, DomainError> {
        let sql = format!("{} WHERE r.request_id = $1 GROUP BY r.request_id", SELECT_REQUEST);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch review request", e))?;

        row.as_ref().map(row_to_request).transpose()
    }

    async fn create(&self, request: &ReviewRequest) -> Result<CreateOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("begin transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO review_requests (request_id, title, author_id, status, created_at, closed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(request.id().as_str())
        .bind(request.title())
        .bind(request.author_id().as_str())
        .bind(request.status().as_str())
        .bind(request.created_at().as_datetime())
        .bind(request.closed_at().map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Ok(CreateOutcome::AlreadyExists),
            Err(e) => return Err(query_failed("insert review request", e)),
        }

        for reviewer in request.reviewers().iter() {
            sqlx::query("INSERT INTO review_assignments (request_id, person_id) VALUES ($1, $2)")
                .bind(request.id().as_str())
                .bind(reviewer.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| query_failed("insert review assignment", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| query_failed("commit transaction", e))?;

        Ok(CreateOutcome::Created)
    }

    async fn close(
        &self,
        id: &ReviewRequestId,
        closed_at: Timestamp,
    ) -> Result<CloseOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE review_requests SET status = $2, closed_at = $3
            WHERE request_id = $1 AND status = $4
            "#,
        )
        .bind(id.as_str())
        .bind(ReviewStatus::Closed.as_str())
        .bind(closed_at.as_datetime())
        .bind(ReviewStatus::Open.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("close review request", e))?;

        if result.rows_affected() > 0 {
            return Ok(CloseOutcome::Closed);
        }
        if self.exists(id).await? {
            Ok(CloseOutcome::AlreadyClosed)
        } else {
            Ok(CloseOutcome::NotFound)
        }
    }

    async fn substitute_reviewer(
        &self,
        id: &ReviewRequestId,
        old: &PersonId,
        new: &PersonId,
    ) -> Result<SubstituteOutcome, DomainError> {
        // A concurrent winner either moved the row off `old` (zero rows) or
        // already holds `new` on this request (unique violation).
        let result = sqlx::query(SUBSTITUTE_REVIEWER)
            .bind(id.as_str())
            .bind(old.as_str())
            .bind(new.as_str())
            .bind(ReviewStatus::Open.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(SubstituteOutcome::Substituted),
            Ok(_) => Ok(SubstituteOutcome::NotAssigned),
            Err(e) if is_unique_violation(&e) => Ok(SubstituteOutcome::NotAssigned),
            Err(e) => Err(query_failed("substitute reviewer", e)),
        }
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &PersonId,
    ) -> Result<Vec<ReviewRequest>, DomainError> {
        let sql = format!(
            r#"{}
            WHERE r.request_id IN (
                SELECT request_id FROM review_assignments WHERE person_id = $1
            )
            GROUP BY r.request_id
            ORDER BY r.created_at, r.request_id
            "#,
            SELECT_REQUEST
        );
        let rows = sqlx::query(&sql)
            .bind(reviewer.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("fetch review requests by reviewer", e))?;

        rows.iter().map(row_to_request).collect()
    }
}

fn row_to_request(row: &PgRow) -> Result<ReviewRequest, DomainError> {
    let id: String = row
        .try_get("request_id")
        .map_err(|e| corrupt_row("request_id", e))?;
    let title: String = row.try_get("title").map_err(|e| corrupt_row("title", e))?;
    let author_id: String = row
        .try_get("author_id")
        .map_err(|e| corrupt_row("author_id", e))?;
    let status: String = row.try_get("status").map_err(|e| corrupt_row("status", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| corrupt_row("created_at", e))?;
    let closed_at: Option<DateTime<Utc>> = row
        .try_get("closed_at")
        .map_err(|e| corrupt_row("closed_at", e))?;
    let reviewers: Vec<String> = row
        .try_get("reviewers")
        .map_err(|e| corrupt_row("reviewers", e))?;

    let status =
        ReviewStatus::parse(&status).ok_or_else(|| corrupt_row("status", &status))?;
    let reviewers = reviewers
        .into_iter()
        .map(PersonId::new)
        .collect::<Result<Vec<_>, _>>()
        .and_then(ReviewerSet::new)
        .map_err(|e| corrupt_row("reviewers", e))?;

    Ok(ReviewRequest::reconstitute(
        ReviewRequestId::new(id).map_err(|e| corrupt_row("request_id", e))?,
        title,
        PersonId::new(author_id).map_err(|e| corrupt_row("author_id", e))?,
        status,
        reviewers,
        Timestamp::from_datetime(created_at),
        closed_at.map(Timestamp::from_datetime),
    ))
}
