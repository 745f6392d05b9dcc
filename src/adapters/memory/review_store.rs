//! In-memory review request store.
//!
//! All operations run under one async mutex, which makes create, close and
//! substitute atomic in the same way the Postgres adapter's single
//! statements are.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, PersonId, ReviewRequestId, Timestamp};
use crate::domain::review::ReviewRequest;
use crate::ports::{CloseOutcome, CreateOutcome, ReviewRequestStore, SubstituteOutcome};

/// Thread-safe in-memory store. Does not persist across restarts.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    requests: Mutex<BTreeMap<ReviewRequestId, ReviewRequest>>,
}

impl InMemoryReviewStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored requests.
    pub async fn len(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.requests.lock().await.is_empty()
    }
}

#[async_trait]
impl ReviewRequestStore for InMemoryReviewStore {
    async fn get(&self, id: &ReviewRequestId) -> Result<Option<ReviewRequest>, DomainError> {
        Ok(self.requests.lock().await.get(id).cloned())
    }

    async fn create(&self, request: &ReviewRequest) -> Result<CreateOutcome, DomainError> {
        let mut requests = self.requests.lock().await;
        if requests.contains_key(request.id()) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        requests.insert(request.id().clone(), request.clone());
        Ok(CreateOutcome::Created)
    }

    async fn close(
        &self,
        id: &ReviewRequestId,
        closed_at: Timestamp,
    ) -> Result<CloseOutcome, DomainError> {
        let mut requests = self.requests.lock().await;
        Ok(match requests.get_mut(id) {
            None => CloseOutcome::NotFound,
            Some(request) => {
                if request.close(closed_at) {
                    CloseOutcome::Closed
                } else {
                    CloseOutcome::AlreadyClosed
                }
            }
        })
    }

    async fn substitute_reviewer(
        &self,
        id: &ReviewRequestId,
        old: &PersonId,
        new: &PersonId,
    ) -> Result<SubstituteOutcome, DomainError> {
        let mut requests = self.requests.lock().await;
        let Some(request) = requests.get_mut(id) else {
            return Ok(SubstituteOutcome::NotAssigned);
        };
        Ok(match request.replace_reviewer(old, new.clone()) {
            Ok(()) => SubstituteOutcome::Substituted,
            Err(_) => SubstituteOutcome::NotAssigned,
        })
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &PersonId,
    ) -> Result<Vec<ReviewRequest>, DomainError> {
        let mut found: Vec<ReviewRequest> = self
            .requests
            .lock()
            .await
            .values()
            .filter(|r| r.reviewers().contains(reviewer))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()).then_with(|| a.id().cmp(b.id())));
        Ok(found)
    }
}
