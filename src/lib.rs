//! Review Service - code-review assignment engine
//!
//! Opens review requests with randomly chosen teammates as reviewers,
//! closes them, and reassigns a reviewer without losing updates when
//! callers race.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
