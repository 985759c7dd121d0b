// SPDX-License-Identifier: MPL-2.0
//! Translation catalog model.

mod stats;
mod types;

pub use stats::CatalogStats;
pub use types::{
    Catalog, Context, Location, Message, Translation, TranslationBody, TranslationKind, Triple,
    DEFAULT_TS_VERSION, NUMERUS_SEPARATOR,
};
