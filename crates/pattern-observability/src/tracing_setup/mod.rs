//! Tracing setup: structured logging with span definitions.

pub mod spans;

use pattern_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "PATTERN_LOG";

/// Install the subscriber described by `config`. `PATTERN_LOG` wins over
/// `config.log_level` when set. Safe to call more than once; later calls
/// are no-ops.
pub fn init_from_config(config: &ObservabilityConfig) {
    let env = std::env::var(LOG_ENV_VAR).ok();
    install(&filter_directive(config, env.as_deref()), config.json_logs);
}

/// JSON output filtered by `PATTERN_LOG`, `info` when unset.
pub fn init_tracing() {
    init_from_config(&ObservabilityConfig {
        log_level: "info".to_string(),
        json_logs: true,
    });
}

/// JSON output with an explicit filter, ignoring `PATTERN_LOG`.
pub fn init_tracing_with_filter(filter: &str) {
    install(filter, true);
}

/// Filter the subscriber uses: a valid environment directive, else the
/// configured level.
pub fn filter_directive(config: &ObservabilityConfig, env: Option<&str>) -> String {
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() && EnvFilter::try_new(directive).is_ok() => {
            directive.to_string()
        }
        _ => config.log_level.clone(),
    }
}

fn install(directive: &str, json: bool) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
