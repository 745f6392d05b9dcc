//! In-memory adapters for the directory and review store ports.

mod directory;
mod review_store;

pub use directory::InMemoryDirectory;
pub use review_store::InMemoryReviewStore;
