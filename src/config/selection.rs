//! Reviewer selection configuration

use serde::Deserialize;

/// Reviewer selection configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionConfig {
    /// Fixed seed for reviewer selection. When set, the same sequence of
    /// requests yields the same reviewers across restarts.
    pub seed: Option<u64>,
}

impl SelectionConfig {
    pub fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }
}
