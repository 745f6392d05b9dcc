//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Directory` - resolve people and teams (read-only)
//! - `TeamRegistry` - register teams, toggle people active/inactive
//! - `ReviewRequestStore` - atomic persistence of review requests
//! - `RandomSource` - injectable randomness for reviewer selection

mod directory;
mod random_source;
mod review_request_store;
mod team_registry;

pub use directory::Directory;
pub use random_source::RandomSource;
pub use review_request_store::{
    CloseOutcome, CreateOutcome, ReviewRequestStore, SubstituteOutcome,
};
pub use team_registry::{RegisterOutcome, TeamRegistry};
