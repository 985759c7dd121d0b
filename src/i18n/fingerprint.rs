// SPDX-License-Identifier: MPL-2.0
//! Content digest of a catalog's runtime lookup table.

use crate::domain::catalog::Catalog;

/// BLAKE3 digest (hex) of everything [`Catalog::lookup_table`] would serve.
///
/// Two loads of the same file give the same fingerprint; location and
/// comment changes that do not affect lookups do not change it.
#[must_use]
pub fn fingerprint(catalog: &Catalog) -> String {
    let mut hasher = blake3::Hasher::new();
    for ((context, source), translation) in catalog.lookup_table() {
        for field in [&context, &source, &translation] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

impl Catalog {
    /// Shorthand for [`fingerprint`].
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}
