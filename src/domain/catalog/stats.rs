// SPDX-License-Identifier: MPL-2.0
//! Per-catalog translation progress counters.

use super::types::{Catalog, TranslationKind};

/// Translation progress of one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub contexts: usize,
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// Vanished and obsolete messages.
    pub vanished: usize,
    /// Finished messages whose translation is empty.
    pub empty_finished: usize,
}

impl CatalogStats {
    /// Collects counters for `catalog`.
    #[must_use]
    pub fn of(catalog: &Catalog) -> Self {
        let mut stats = Self {
            contexts: catalog.context_names().len(),
            ..Self::default()
        };
        for (_, message) in catalog.messages() {
            stats.messages += 1;
            match message.translation.kind {
                TranslationKind::Finished if message.translation.is_empty() => {
                    stats.empty_finished += 1;
                }
                TranslationKind::Finished => stats.finished += 1,
                TranslationKind::Unfinished => stats.unfinished += 1,
                TranslationKind::Vanished | TranslationKind::Obsolete => stats.vanished += 1,
            }
        }
        stats
    }

    /// Messages still referenced by the UI code.
    #[must_use]
    pub fn live(&self) -> usize {
        self.messages - self.vanished
    }

    /// Share of live messages with a usable translation, 0–100.
    #[must_use]
    pub fn completion_percent(&self) -> f64 {
        let live = self.live();
        if live == 0 {
            return 100.0;
        }
        self.finished as f64 * 100.0 / live as f64
    }
}

impl Catalog {
    /// Shorthand for [`CatalogStats::of`].
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Message, Translation, TranslationBody};

    #[test]
    fn counts_each_translation_state() {
        let mut catalog = Catalog::default();
        let ctx = catalog.context_mut_or_insert("SettingsDialog");
        ctx.messages.push(Message::new("Apply", Translation::finished("Anvend")));
        ctx.messages.push(Message::new("Cancel", Translation::unfinished()));
        ctx.messages.push(Message::new("Blank", Translation::finished("")));
        ctx.messages.push(Message::new(
            "Old",
            Translation {
                kind: TranslationKind::Vanished,
                body: TranslationBody::Text("Gammel".into()),
            },
        ));

        let stats = catalog.stats();
        assert_eq!(stats.contexts, 1);
        assert_eq!(stats.messages, 4);
        assert_eq!(stats.finished, 1);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(stats.empty_finished, 1);
        assert_eq!(stats.vanished, 1);
        assert_eq!(stats.live(), 3);
    }

    #[test]
    fn empty_catalog_is_complete() {
        assert_eq!(Catalog::default().stats().completion_percent(), 100.0);
    }

    #[test]
    fn completion_ignores_vanished_messages() {
        let mut catalog = Catalog::default();
        let ctx = catalog.context_mut_or_insert("A");
        ctx.messages.push(Message::new("x", Translation::finished("y")));
        ctx.messages.push(Message::new("z", Translation::unfinished()));
        assert_eq!(catalog.stats().completion_percent(), 50.0);
    }
}
