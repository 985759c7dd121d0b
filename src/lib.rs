// SPDX-License-Identifier: MPL-2.0
//! `ts_lens` reads, checks and converts Qt Linguist TS translation catalogs.
//!
//! It parses `.ts` files into a catalog model, serves runtime lookups with
//! fallback to the source string, audits placeholders and numerus forms, and
//! exports to gettext PO, JSON and Fluent.

#![doc(html_root_url = "https://docs.rs/ts_lens/0.3.0")]

pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod placeholder;
pub mod ts;

pub use domain::catalog::Catalog;
pub use error::{Error, Result};
pub use i18n::Translator;
