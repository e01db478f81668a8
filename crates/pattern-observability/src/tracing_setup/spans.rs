//! Span definitions per operation: routed reads, routed writes, policy
//! evaluation, cache sweeps.

/// Create a span for a routed read.
#[macro_export]
macro_rules! router_query_span {
    ($query:expr, $requester:expr) => {
        tracing::info_span!("pattern.router.query", query = %$query, requester = ?$requester)
    };
}

/// Create a span for a routed write.
#[macro_export]
macro_rules! router_store_span {
    ($category:expr, $destination:expr) => {
        tracing::info_span!("pattern.router.store", category = %$category, destination = ?$destination)
    };
}

/// Create a span for a policy evaluation.
#[macro_export]
macro_rules! policy_span {
    ($agent:expr) => {
        tracing::info_span!("pattern.policy", agent = %$agent)
    };
}

/// Create a span for a cache expiry sweep.
#[macro_export]
macro_rules! cache_sweep_span {
    ($entries:expr) => {
        tracing::debug_span!("pattern.cache.sweep", entries = $entries)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ROUTER_QUERY: &str = "pattern.router.query";
    pub const ROUTER_STORE: &str = "pattern.router.store";
    pub const POLICY: &str = "pattern.policy";
    pub const CACHE_SWEEP: &str = "pattern.cache.sweep";
}
