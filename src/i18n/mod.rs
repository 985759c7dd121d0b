// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) runtime over Qt TS catalogs.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Loading of every `.ts` catalog in a directory
//! - Runtime language switching
//! - Fallback to the source string when a translation is missing or unfinished

pub mod catalog_set;
pub mod fingerprint;
pub mod locale;
pub mod translator;

pub use catalog_set::{CatalogSet, LoadedCatalog};
pub use fingerprint::fingerprint;
pub use translator::Translator;
