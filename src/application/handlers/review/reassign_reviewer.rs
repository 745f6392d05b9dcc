//! ReassignReviewerHandler - Command handler for swapping one reviewer.

use std::sync::Arc;

use crate::domain::foundation::{PersonId, ReviewRequestId};
use crate::domain::review::{select_replacement, ReviewError, ReviewRequest};
use crate::ports::{Directory, RandomSource, ReviewRequestStore, SubstituteOutcome};

/// Command to replace `old_reviewer_id` on an open request.
#[derive(Debug, Clone)]
pub struct ReassignReviewerCommand {
    pub request_id: ReviewRequestId,
    pub old_reviewer_id: PersonId,
}

/// Result of a successful reassignment.
#[derive(Debug, Clone)]
pub struct ReassignReviewerResult {
    pub request: ReviewRequest,
    pub replaced_by: PersonId,
}

/// Handler for reviewer reassignment.
///
/// The replacement pool is the departing reviewer's team, not the author's.
pub struct ReassignReviewerHandler {
    directory: Arc<dyn Directory>,
    store: Arc<dyn ReviewRequestStore>,
    random: Arc<dyn RandomSource>,
}

impl ReassignReviewerHandler {
    pub fn new(
        directory: Arc<dyn Directory>,
        store: Arc<dyn ReviewRequestStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            directory,
            store,
            random,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReassignReviewerCommand,
    ) -> Result<ReassignReviewerResult, ReviewError> {
        // 1. Load request and check it can change
        let request = self.load(&cmd.request_id).await?;
        request.ensure_reassignable(&cmd.old_reviewer_id)?;

        // 2. Resolve the departing reviewer's team
        let old_reviewer = self
            .directory
            .get_person(&cmd.old_reviewer_id)
            .await
            .map_err(|e| ReviewError::infrastructure("resolving reviewer", e))?
            .ok_or_else(|| ReviewError::not_found("reviewer", &cmd.old_reviewer_id))?;
        let team_name = old_reviewer
            .team()
            .ok_or_else(|| ReviewError::not_found("team of reviewer", &cmd.old_reviewer_id))?;
        let team = self
            .directory
            .get_team(team_name)
            .await
            .map_err(|e| ReviewError::infrastructure("resolving reviewer team", e))?
            .ok_or_else(|| ReviewError::not_found("team", team_name))?;

        // 3. Pick the replacement
        let replacement = select_replacement(
            request.author_id(),
            request.reviewers(),
            team.members(),
            self.random.as_ref(),
        )
        .ok_or_else(|| ReviewError::no_candidate(request.id()))?;

        // 4. Conditional swap on (request, old reviewer)
        let outcome = self
            .store
            .substitute_reviewer(&cmd.request_id, &cmd.old_reviewer_id, &replacement)
            .await
            .map_err(|e| ReviewError::infrastructure("substituting reviewer", e))?;
        if outcome == SubstituteOutcome::NotAssigned {
            tracing::warn!(
                request_id = %cmd.request_id,
                old_reviewer_id = %cmd.old_reviewer_id,
                "reviewer changed underneath reassignment"
            );
            return Err(ReviewError::not_assigned(&cmd.old_reviewer_id, &cmd.request_id));
        }

        // 5. Re-read the committed state
        let request = self.load(&cmd.request_id).await?;
        tracing::info!(
            request_id = %cmd.request_id,
            old_reviewer_id = %cmd.old_reviewer_id,
            new_reviewer_id = %replacement,
            "reviewer reassigned"
        );

        Ok(ReassignReviewerResult {
            request,
            replaced_by: replacement,
        })
    }

    async fn load(&self, id: &ReviewRequestId) -> Result<ReviewRequest, ReviewError> {
        self.store
            .get(id)
            .await
            .map_err(|e| ReviewError::infrastructure("loading review request", e))?
            .ok_or_else(|| ReviewError::not_found("pull request", id))
    }
}
