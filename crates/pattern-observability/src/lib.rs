//! # pattern-observability
//!
//! Structured logging for the routing layer: subscriber setup driven by
//! `PATTERN_LOG` or [`ObservabilityConfig`], plus named span macros.

pub mod tracing_setup;

pub use pattern_core::config::ObservabilityConfig;
pub use tracing_setup::{filter_directive, init_from_config, init_tracing, init_tracing_with_filter};
