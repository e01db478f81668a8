//! # pattern-router
//!
//! Reads fan out to the private and public stores in parallel, then merge:
//! tag by source, deduplicate (private wins), rank private-first by
//! relevance, truncate. Writes follow a [`Destination`] chosen by the
//! policy engine.
//!
//! [`Destination`]: pattern_core::models::Destination

pub mod merge;
pub mod options;
pub mod router;

pub use options::RouteOptions;
pub use router::{PatternRouter, RoutedCache, RouterStats, StoreOutcome};
