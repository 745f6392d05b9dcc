//! ListAssignedReviewsHandler - Query handler for a person's review queue.

use std::sync::Arc;

use crate::domain::foundation::PersonId;
use crate::domain::review::{ReviewError, ReviewRequest};
use crate::ports::{Directory, ReviewRequestStore};

/// Query for every request that lists `person_id` as a reviewer.
#[derive(Debug, Clone)]
pub struct ListAssignedReviewsQuery {
    pub person_id: PersonId,
}

/// Handler for listing assigned reviews, oldest first.
pub struct ListAssignedReviewsHandler {
    directory: Arc<dyn Directory>,
    store: Arc<dyn ReviewRequestStore>,
}

impl ListAssignedReviewsHandler {
    pub fn new(directory: Arc<dyn Directory>, store: Arc<dyn ReviewRequestStore>) -> Self {
        Self { directory, store }
    }

    pub async fn handle(
        &self,
        query: ListAssignedReviewsQuery,
    ) -> Result<Vec<ReviewRequest>, ReviewError> {
        self.directory
            .get_person(&query.person_id)
            .await
            .map_err(|e| ReviewError::infrastructure("resolving person", e))?
            .ok_or_else(|| ReviewError::not_found("user", &query.person_id))?;

        self.store
            .list_by_reviewer(&query.person_id)
            .await
            .map_err(|e| ReviewError::infrastructure("listing assigned reviews", e))
    }
}
