//! Breed Match - dog breed recommendation service
//!
//! This library ranks dog breeds against a user's questionnaire answers.
//! Each answer targets one breed trait; dealbreakers remove breeds outright
//! and the rest contribute a weighted score normalized to a percentage.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::Matcher;
pub use models::{Answer, Breed, MatchResult, ScoringConfig};
