//! # pattern-policy
//!
//! Decides where a candidate pattern may be stored.
//!
//! ```text
//! PolicyEngine::evaluate(pattern)
//! ├── PathDenylist        (secret locations → CREDENTIALS, no further analysis)
//! ├── ISanitizer          (pluggable; RuleSanitizer by default)
//! ├── classify            (sanitizer decision + level → Classification)
//! └── destination         (classification + confidence → Destination)
//! ```
//!
//! The engine fails closed: a sanitizer error yields a private-only decision.

pub mod decision;
pub mod denylist;
pub mod engine;
pub mod sanitizer;

pub use denylist::PathDenylist;
pub use engine::PolicyEngine;
pub use sanitizer::RuleSanitizer;
