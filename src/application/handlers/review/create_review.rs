//! CreateReviewHandler - Command handler for opening review requests.

use std::sync::Arc;

use crate::domain::foundation::{PersonId, ReviewRequestId, Timestamp};
use crate::domain::review::{select_initial, ReviewError, ReviewRequest};
use crate::ports::{CreateOutcome, Directory, RandomSource, ReviewRequestStore};

/// Command to open a review request.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub request_id: ReviewRequestId,
    pub title: String,
    pub author_id: PersonId,
}

/// Handler for opening review requests.
///
/// Reviewers are drawn from the author's team at the moment of creation.
pub struct CreateReviewHandler {
    directory: Arc<dyn Directory>,
    store: Arc<dyn ReviewRequestStore>,
    random: Arc<dyn RandomSource>,
}

impl CreateReviewHandler {
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

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<ReviewRequest, ReviewError> {
        // 1. Resolve author
        let author = self
            .directory
            .get_person(&cmd.author_id)
            .await
            .map_err(|e| ReviewError::infrastructure("resolving author", e))?
            .ok_or_else(|| ReviewError::not_found("author", &cmd.author_id))?;

        // 2. Resolve author's team
        let team_name = author
            .team()
            .ok_or_else(|| ReviewError::not_found("team of author", &cmd.author_id))?;
        let team = self
            .directory
            .get_team(team_name)
            .await
            .map_err(|e| ReviewError::infrastructure("resolving author team", e))?
            .ok_or_else(|| ReviewError::not_found("team", team_name))?;

        // 3. Pick reviewers
        let reviewers = select_initial(author.id(), team.members(), self.random.as_ref());
        tracing::debug!(
            request_id = %cmd.request_id,
            team = %team_name,
            pool = team.members().len(),
            reviewers = ?reviewers.as_slice(),
            "selected initial reviewers"
        );

        // 4. Build and persist
        let request = ReviewRequest::open(
            cmd.request_id,
            cmd.title,
            cmd.author_id,
            reviewers,
            Timestamp::now(),
        )?;

        match self
            .store
            .create(&request)
            .await
            .map_err(|e| ReviewError::infrastructure("storing review request", e))?
        {
            CreateOutcome::Created => {
                tracing::info!(
                    request_id = %request.id(),
                    author_id = %request.author_id(),
                    reviewers = request.reviewers().len(),
                    "review request opened"
                );
                Ok(request)
            }
            CreateOutcome::AlreadyExists => {
                tracing::warn!(request_id = %request.id(), "review request already exists");
                Err(ReviewError::request_exists(request.id()))
            }
        }
    }
}
