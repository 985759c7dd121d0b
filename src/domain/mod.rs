// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core catalog types with ZERO external dependencies.
//!
//! This module contains the pure data model of a Qt Linguist catalog and the
//! plural rules used to pick numerus forms. It has no dependencies on external
//! crates (except `std`) so that readers, writers and exporters can all share it.
//!
//! # Modules
//!
//! - [`catalog`]: Catalog types ([`Catalog`](catalog::Catalog), [`Context`](catalog::Context),
//!   [`Message`](catalog::Message), [`Translation`](catalog::Translation))
//! - [`plural`]: Plural rules ([`PluralRule`](plural::PluralRule))

pub mod catalog;
pub mod plural;
