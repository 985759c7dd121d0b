// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use crate::domain::catalog::Catalog;
use crate::domain::plural::PluralRule;
use crate::placeholder::{interpolate, FormatArgs};
use unic_langid::LanguageIdentifier;

use super::catalog_set::CatalogSet;
use super::locale::{parse_locale, same_language};

/// Runtime lookup for the active locale.
///
/// When no catalog matches the requested locale the translator serves the
/// source strings unchanged.
pub struct Translator {
    catalogs: CatalogSet,
    current_locale: Option<LanguageIdentifier>,
    source_locale: Option<LanguageIdentifier>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(CatalogSet::new(), None, &Config::default())
    }
}

impl Translator {
    pub fn new(catalogs: CatalogSet, cli_lang: Option<String>, config: &Config) -> Self {
        let source_locale = parse_locale(&config.general.source_language);
        let current_locale = resolve_locale(
            cli_lang.as_deref(),
            config.general.language.as_deref(),
            &catalogs,
        );
        match &current_locale {
            Some(locale) => tracing::info!(locale = %locale, "active locale"),
            None => tracing::info!("no matching catalog, serving source strings"),
        }

        Self {
            catalogs,
            current_locale,
            source_locale,
        }
    }

    /// Locale of the catalog in use; `None` means source strings.
    pub fn current_locale(&self) -> Option<&LanguageIdentifier> {
        self.current_locale.as_ref()
    }

    /// Locales a catalog is loaded for.
    pub fn available_locales(&self) -> Vec<&LanguageIdentifier> {
        self.catalogs.locales()
    }

    /// Switches to the best catalog for `locale`.
    ///
    /// Returns `false` and keeps the current locale if nothing matches. The
    /// source language itself is always accepted.
    pub fn set_locale(&mut self, locale: &LanguageIdentifier) -> bool {
        if let Some(loaded) = self.catalogs.best_match(locale) {
            self.current_locale = Some(loaded.locale.clone());
            return true;
        }
        if self
            .source_locale
            .as_ref()
            .is_some_and(|source| same_language(source, locale))
        {
            self.current_locale = None;
            return true;
        }
        false
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.current_locale
            .as_ref()
            .and_then(|locale| self.catalogs.get(locale))
    }

    /// Translated text for `source` in `context`, else `source` itself.
    pub fn tr(&self, context: &str, source: &str) -> String {
        self.lookup(context, source, None)
            .unwrap_or(source)
            .to_string()
    }

    /// [`tr`](Self::tr) for a message carrying a disambiguation comment.
    pub fn tr_disambiguated(&self, context: &str, source: &str, comment: &str) -> String {
        self.lookup(context, source, Some(comment))
            .unwrap_or(source)
            .to_string()
    }

    /// [`tr`](Self::tr) followed by placeholder substitution.
    pub fn tr_args(&self, context: &str, source: &str, args: &FormatArgs) -> String {
        let template = self.lookup(context, source, None).unwrap_or(source);
        interpolate(template, args)
    }

    /// Numerus lookup: picks the plural form for `n` and substitutes `%n`.
    pub fn tr_plural(&self, context: &str, source: &str, n: u64, args: &FormatArgs) -> String {
        let args = if args.get_count().is_some() {
            args.clone()
        } else {
            args.clone().count(n)
        };

        let forms = self
            .catalog()
            .and_then(|catalog| catalog.lookup_forms(context, source));
        let template = match (forms, &self.current_locale) {
            (Some(forms), Some(locale)) if !forms.is_empty() => {
                let rule = PluralRule::for_language(locale.language.as_str());
                let index = rule.form_index(n).min(forms.len() - 1);
                forms[index].as_str()
            }
            _ => source,
        };
        let template = if template.is_empty() { source } else { template };
        interpolate(template, &args)
    }

    fn lookup(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        let catalog = self.catalog()?;
        let found = catalog.lookup_disambiguated(context, source, comment);
        if found.is_none() {
            tracing::trace!(context, source, "no translation, using source");
        }
        found
    }
}

/// Picks the active locale: CLI, then config, then OS locale.
fn resolve_locale(
    cli_lang: Option<&str>,
    config_lang: Option<&str>,
    catalogs: &CatalogSet,
) -> Option<LanguageIdentifier> {
    let os_locale = sys_locale::get_locale();
    resolve_from_candidates(&[cli_lang, config_lang, os_locale.as_deref()], catalogs)
}

fn resolve_from_candidates(
    candidates: &[Option<&str>],
    catalogs: &CatalogSet,
) -> Option<LanguageIdentifier> {
    candidates
        .iter()
        .flatten()
        .filter_map(|code| parse_locale(code))
        .find_map(|locale| catalogs.best_match(&locale).map(|c| c.locale.clone()))
}
