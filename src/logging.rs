// SPDX-License-Identifier: MPL-2.0
//! Log output of the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the executable.

use tracing_subscriber::EnvFilter;

use crate::config::defaults::ENV_LOG_FILTER;

/// Filter directive to use: `TS_LENS_LOG` wins, then `-v`, then the config.
#[must_use]
pub fn filter_directive(env_value: Option<&str>, verbose: bool, config_level: &str) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None if verbose => "debug".to_string(),
        None => config_level.to_string(),
    }
}

/// Installs a stderr subscriber. Invalid directives fall back to `warn`.
///
/// Calling it again is a no-op.
pub fn init(verbose: bool, config_level: &str) {
    let env_value = std::env::var(ENV_LOG_FILTER).ok();
    let directive = filter_directive(env_value.as_deref(), verbose, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
