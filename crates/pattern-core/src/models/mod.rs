mod pattern;
mod pattern_match;
mod policy_decision;
mod query;
mod store_stats;

pub use pattern::Pattern;
pub use pattern_match::{PatternMatch, RoutedMatch, Source};
pub use policy_decision::{Classification, Destination, PolicyDecision, SanitizationLevel};
pub use query::PatternQuery;
pub use store_stats::StoreStats;
