//! Team domain module.
//!
//! People and the teams they belong to. The review engine only reads these;
//! they are maintained through directory management.

mod errors;
mod person;
#[allow(clippy::module_inception)]
mod team;

pub use errors::DirectoryError;
pub use person::Person;
pub use team::Team;
