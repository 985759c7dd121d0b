// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **General**: Source language and catalog lookup
//! - **Logging**: Default log filter

// ==========================================================================
// General Defaults
// ==========================================================================

/// Language of the `<source>` strings when a catalog does not declare one.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Directory searched for `*.ts` files when none is configured.
pub const DEFAULT_CATALOG_DIR: &str = "i18n";

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable holding a `tracing` filter that overrides the config.
pub const ENV_LOG_FILTER: &str = "TS_LENS_LOG";
