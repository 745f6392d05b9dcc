//! Integration tests for the review request lifecycle.
//!
//! Runs create, close and reassign end to end against the in-memory
//! adapters, including two reassignments racing on the same reviewer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

use review_service::adapters::memory::{InMemoryDirectory, InMemoryReviewStore};
use review_service::adapters::random::SeededRandomSource;
use review_service::application::handlers::review::{
    CloseReviewCommand, CreateReviewCommand, ReassignReviewerCommand, ReviewLifecycle,
};
use review_service::domain::foundation::{
    DomainError, PersonId, ReviewRequestId, TeamName, Timestamp,
};
use review_service::domain::review::{ConflictReason, ReviewRequest, ReviewStatus};
use review_service::domain::team::{Person, Team};
use review_service::ports::{
    CloseOutcome, CreateOutcome, ReviewRequestStore, SubstituteOutcome, TeamRegistry,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn pid(s: &str) -> PersonId {
    PersonId::new(s).unwrap()
}

fn rid(s: &str) -> ReviewRequestId {
    ReviewRequestId::new(s).unwrap()
}

fn team(name: &str, members: &[(&str, bool)]) -> Team {
    let team_name = TeamName::new(name).unwrap();
    Team::new(
        team_name.clone(),
        members
            .iter()
            .map(|(id, active)| Person::new(pid(id), *id, Some(team_name.clone()), *active))
            .collect(),
    )
    .unwrap()
}

fn create(id: &str, author: &str) -> CreateReviewCommand {
    CreateReviewCommand {
        request_id: rid(id),
        title: "feat".to_string(),
        author_id: pid(author),
    }
}

fn lifecycle(teams: Vec<Team>, store: Arc<dyn ReviewRequestStore>, seed: u64) -> ReviewLifecycle {
    ReviewLifecycle::new(
        Arc::new(InMemoryDirectory::with_teams(teams)),
        store,
        Arc::new(SeededRandomSource::new(seed)),
    )
}

/// Store whose first `parties` reads wait for each other, so concurrent
/// callers all observe the same state before any of them writes.
struct BarrierStore {
    inner: InMemoryReviewStore,
    barrier: Barrier,
    parties: usize,
    reads: AtomicUsize,
}

impl BarrierStore {
    fn new(inner: InMemoryReviewStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
            parties,
            reads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReviewRequestStore for BarrierStore {
    async fn get(&self, id: &ReviewRequestId) -> Result<Option<ReviewRequest>, DomainError> {
        let snapshot = self.inner.get(id).await;
        if self.reads.fetch_add(1, Ordering::SeqCst) < self.parties {
            self.barrier.wait().await;
        }
        snapshot
    }

    async fn create(&self, request: &ReviewRequest) -> Result<CreateOutcome, DomainError> {
        self.inner.create(request).await
    }

    async fn close(
        &self,
        id: &ReviewRequestId,
        closed_at: Timestamp,
    ) -> Result<CloseOutcome, DomainError> {
        self.inner.close(id, closed_at).await
    }

    async fn substitute_reviewer(
        &self,
        id: &ReviewRequestId,
        old: &PersonId,
        new: &PersonId,
    ) -> Result<SubstituteOutcome, DomainError> {
        self.inner.substitute_reviewer(id, old, new).await
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &PersonId,
    ) -> Result<Vec<ReviewRequest>, DomainError> {
        self.inner.list_by_reviewer(reviewer).await
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_picks_active_non_author_teammates() {
    let members = [("author1", true), ("u2", true), ("u3", true), ("u4", false)];

    for seed in 0..25 {
        let lifecycle = lifecycle(
            vec![team("backend", &members)],
            Arc::new(InMemoryReviewStore::new()),
            seed,
        );
        let request = lifecycle.create(create("pr1", "author1")).await.unwrap();

        assert_eq!(request.reviewers().len(), 2);
        assert!(!request.reviewers().contains(&pid("author1")));
        assert!(!request.reviewers().contains(&pid("u4")));
    }
}

#[tokio::test]
async fn create_for_lone_author_yields_no_reviewers() {
    let lifecycle = lifecycle(
        vec![team("solo", &[("author1", true), ("u2", false)])],
        Arc::new(InMemoryReviewStore::new()),
        3,
    );

    let request = lifecycle.create(create("pr1", "author1")).await.unwrap();
    assert!(request.reviewers().is_empty());
    assert_eq!(request.status(), ReviewStatus::Open);
}

#[tokio::test]
async fn create_with_used_id_leaves_original_untouched() {
    let store = Arc::new(InMemoryReviewStore::new());
    let lifecycle = lifecycle(
        vec![team("backend", &[("author1", true), ("u2", true), ("u3", true)])],
        store.clone(),
        8,
    );
    let original = lifecycle.create(create("pr1", "author1")).await.unwrap();

    let err = lifecycle.create(create("pr1", "u2")).await.unwrap_err();

    assert_eq!(err.conflict_reason(), Some(ConflictReason::RequestExists));
    assert_eq!(store.get(&rid("pr1")).await.unwrap(), Some(original));
}

// =============================================================================
// Close
// =============================================================================

#[tokio::test]
async fn close_twice_returns_identical_state() {
    let lifecycle = lifecycle(
        vec![team("backend", &[("author1", true), ("u2", true)])],
        Arc::new(InMemoryReviewStore::new()),
        1,
    );
    lifecycle.create(create("pr1", "author1")).await.unwrap();

    let first = lifecycle
        .close(CloseReviewCommand { request_id: rid("pr1") })
        .await
        .unwrap();
    let second = lifecycle
        .close(CloseReviewCommand { request_id: rid("pr1") })
        .await
        .unwrap();

    assert_eq!(first.request.status(), ReviewStatus::Closed);
    assert_eq!(first.request.closed_at(), second.request.closed_at());
    assert_eq!(first.request, second.request);
}

// =============================================================================
// Reassign
// =============================================================================

#[tokio::test]
async fn reassign_keeps_size_and_the_other_reviewer() {
    let lifecycle = lifecycle(
        vec![team(
            "backend",
            &[("author1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", true)],
        )],
        Arc::new(InMemoryReviewStore::new()),
        21,
    );
    let created = lifecycle.create(create("pr1", "author1")).await.unwrap();
    let departing = created.reviewers().as_slice()[0].clone();
    let staying = created.reviewers().as_slice()[1].clone();

    let result = lifecycle
        .reassign(ReassignReviewerCommand {
            request_id: rid("pr1"),
            old_reviewer_id: departing.clone(),
        })
        .await
        .unwrap();

    assert_eq!(result.request.reviewers().len(), 2);
    assert!(result.request.reviewers().contains(&staying));
    assert!(result.request.reviewers().contains(&result.replaced_by));
    assert!(!result.request.reviewers().contains(&departing));
    assert_ne!(result.replaced_by, pid("author1"));
}

#[tokio::test]
async fn reassign_on_closed_request_changes_nothing() {
    let store = Arc::new(InMemoryReviewStore::new());
    let lifecycle = lifecycle(
        vec![team("backend", &[("author1", true), ("u2", true), ("u3", true), ("u4", true)])],
        store.clone(),
        4,
    );
    let created = lifecycle.create(create("pr1", "author1")).await.unwrap();
    lifecycle
        .close(CloseReviewCommand { request_id: rid("pr1") })
        .await
        .unwrap();
    let before = store.get(&rid("pr1")).await.unwrap();

    let err = lifecycle
        .reassign(ReassignReviewerCommand {
            request_id: rid("pr1"),
            old_reviewer_id: created.reviewers().as_slice()[0].clone(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.conflict_reason(), Some(ConflictReason::RequestMerged));
    assert_eq!(store.get(&rid("pr1")).await.unwrap(), before);
}

#[tokio::test]
async fn reassign_with_exhausted_team_is_no_candidate() {
    let store = Arc::new(InMemoryReviewStore::new());
    let lifecycle = lifecycle(
        vec![team(
            "backend",
            &[("author1", true), ("old_reviewer", true), ("other_reviewer", true)],
        )],
        store.clone(),
        6,
    );
    lifecycle.create(create("pr1", "author1")).await.unwrap();
    let before = store.get(&rid("pr1")).await.unwrap();

    let err = lifecycle
        .reassign(ReassignReviewerCommand {
            request_id: rid("pr1"),
            old_reviewer_id: pid("old_reviewer"),
        })
        .await
        .unwrap_err();

    assert_eq!(err.conflict_reason(), Some(ConflictReason::NoCandidate));
    assert_eq!(store.get(&rid("pr1")).await.unwrap(), before);
}

#[tokio::test]
async fn reassign_draws_from_departing_reviewers_team() {
    // u2 reviews for author1, then moves to "infra" where only u9 is free
    let store = Arc::new(InMemoryReviewStore::new());
    let directory = Arc::new(InMemoryDirectory::with_teams([team(
        "backend",
        &[("author1", true), ("u2", true)],
    )]));
    let lifecycle = ReviewLifecycle::new(
        directory.clone(),
        store.clone(),
        Arc::new(SeededRandomSource::new(2)),
    );
    lifecycle.create(create("pr1", "author1")).await.unwrap();

    directory
        .create_team(&team("infra", &[("u2", true), ("u9", true)]))
        .await
        .unwrap();

    let result = lifecycle
        .reassign(ReassignReviewerCommand {
            request_id: rid("pr1"),
            old_reviewer_id: pid("u2"),
        })
        .await
        .unwrap();
    assert_eq!(result.replaced_by, pid("u9"));
}

#[tokio::test]
async fn concurrent_reassign_has_exactly_one_winner() {
    let inner = InMemoryReviewStore::new();
    let seeded = lifecycle(
        vec![team("backend", &[("author1", true), ("u2", true), ("u3", true)])],
        Arc::new(InMemoryReviewStore::new()),
        0,
    );
    // open with a known reviewer pair, then copy into the racing store
    let request = seeded.create(create("pr1", "author1")).await.unwrap();
    inner.create(&request).await.unwrap();

    let store = Arc::new(BarrierStore::new(inner, 2));
    let lifecycle = lifecycle(
        vec![team(
            "backend",
            &[("author1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", true)],
        )],
        store.clone(),
        13,
    );
    let command = || ReassignReviewerCommand {
        request_id: rid("pr1"),
        old_reviewer_id: pid("u2"),
    };

    let (a, b) = tokio::join!(lifecycle.reassign(command()), lifecycle.reassign(command()));

    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
        (a, b) => panic!("expected exactly one success, got {:?} and {:?}", a, b),
    };
    assert_eq!(loser.conflict_reason(), Some(ConflictReason::NotAssigned));

    let stored = store.get(&rid("pr1")).await.unwrap().unwrap();
    assert_eq!(stored.reviewers().len(), 2);
    assert!(stored.reviewers().contains(&pid("u3")));
    assert!(stored.reviewers().contains(&winner.replaced_by));
    assert!(!stored.reviewers().contains(&pid("u2")));
}
