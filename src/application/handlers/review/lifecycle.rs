//! ReviewLifecycle - the create/close/reassign operations behind one value.

use std::sync::Arc;

use crate::domain::review::{ReviewError, ReviewRequest};
use crate::ports::{Directory, RandomSource, ReviewRequestStore};

use super::{
    CloseReviewCommand, CloseReviewHandler, CloseReviewResult, CreateReviewCommand,
    CreateReviewHandler, ReassignReviewerCommand, ReassignReviewerHandler,
    ReassignReviewerResult,
};

/// Orchestrates the review request lifecycle against a directory and a store.
///
/// Holds no state of its own between calls; every operation re-reads the
/// store.
pub struct ReviewLifecycle {
    create_handler: CreateReviewHandler,
    close_handler: CloseReviewHandler,
    reassign_handler: ReassignReviewerHandler,
}

impl ReviewLifecycle {
    pub fn new(
        directory: Arc<dyn Directory>,
        store: Arc<dyn ReviewRequestStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            create_handler: CreateReviewHandler::new(
                directory.clone(),
                store.clone(),
                random.clone(),
            ),
            close_handler: CloseReviewHandler::new(store.clone()),
            reassign_handler: ReassignReviewerHandler::new(directory, store, random),
        }
    }

    pub async fn create(&self, cmd: CreateReviewCommand) -> Result<ReviewRequest, ReviewError> {
        self.create_handler.handle(cmd).await
    }

    pub async fn close(&self, cmd: CloseReviewCommand) -> Result<CloseReviewResult, ReviewError> {
        self.close_handler.handle(cmd).await
    }

    pub async fn reassign(
        &self,
        cmd: ReassignReviewerCommand,
    ) -> Result<ReassignReviewerResult, ReviewError> {
        self.reassign_handler.handle(cmd).await
    }
}
