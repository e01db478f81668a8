//! # pattern-core
//!
//! Foundation crate for the pattern memory routing layer.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PatternConfig;
pub use errors::{PatternError, PatternResult};
pub use models::{
    Classification, Destination, Pattern, PatternMatch, PatternQuery, PolicyDecision, RoutedMatch,
    SanitizationLevel, Source,
};
