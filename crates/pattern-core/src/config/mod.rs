//! Configuration with TOML file + environment resolution.

mod cache_config;
pub mod defaults;
mod observability_config;
mod policy_config;
mod router_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use policy_config::PolicyConfig;
pub use router_config::RouterConfig;

use crate::constants::MAX_CONFIDENCE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PATTERN_*`)
/// 2. Config file passed to [`PatternConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub cache: CacheConfig,
    pub policy: PolicyConfig,
    pub router: RouterConfig,
    pub observability: ObservabilityConfig,
}

impl PatternConfig {
    /// Load configuration from an optional TOML file, apply environment
    /// overrides, and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PATTERN_*` overrides read through `lookup`.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PATTERN_CACHE_MAX_SIZE").and_then(|v| v.parse().ok()) {
            self.cache.max_cache_size = v;
        }
        if let Some(v) = lookup("PATTERN_CACHE_SIMILARITY_THRESHOLD").and_then(|v| v.parse().ok())
        {
            self.cache.similarity_threshold = v;
        }
        if let Some(v) = lookup("PATTERN_POLICY_CONFIDENCE_THRESHOLD").and_then(|v| v.parse().ok())
        {
            self.policy.confidence_threshold = v;
        }
        if let Some(v) = lookup("PATTERN_ROUTER_MAX_RESULTS").and_then(|v| v.parse().ok()) {
            self.router.max_results = v;
        }
        if let Some(v) = lookup("PATTERN_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cache = &self.cache;
        if cache.max_cache_size == 0 {
            return Err(invalid("cache.max_cache_size", "must be greater than 0"));
        }
        if !(cache.similarity_threshold > 0.0 && cache.similarity_threshold <= 1.0) {
            return Err(invalid(
                "cache.similarity_threshold",
                "must be in (0.0, 1.0]",
            ));
        }
        if cache.hot_ttl_secs < cache.warm_ttl_secs || cache.warm_ttl_secs < cache.cold_ttl_secs {
            return Err(invalid(
                "cache.*_ttl_secs",
                "tier TTLs must satisfy hot >= warm >= cold",
            ));
        }
        if cache.hot_threshold < cache.warm_threshold {
            return Err(invalid(
                "cache.hot_threshold",
                "must be greater than or equal to cache.warm_threshold",
            ));
        }
        if cache.sweep_batch_size == 0 {
            return Err(invalid("cache.sweep_batch_size", "must be greater than 0"));
        }
        if self.policy.confidence_threshold > MAX_CONFIDENCE {
            return Err(invalid(
                "policy.confidence_threshold",
                "must be between 0 and 100",
            ));
        }
        if self.router.max_results == 0 {
            return Err(invalid("router.max_results", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
