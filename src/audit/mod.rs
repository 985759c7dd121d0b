// SPDX-License-Identifier: MPL-2.0
//! Consistency checks over loaded catalogs.
//!
//! Each check is switched by a flag of [`AuditConfig`]. Unreadable files and
//! placeholder mismatches are errors; everything else is a warning.

mod report;

pub use report::{Finding, FindingKind, Report, Severity};

use std::collections::{BTreeSet, HashSet};

use unic_langid::LanguageIdentifier;

use crate::config::AuditConfig;
use crate::domain::catalog::{Catalog, Message, TranslationBody, TranslationKind};
use crate::domain::plural::PluralRule;
use crate::i18n::{CatalogSet, LoadedCatalog};
use crate::placeholder::{self, Placeholder};

/// Audits every catalog of `set`, plus the files it failed to load.
///
/// Context sets are compared against `reference` when given, otherwise
/// against the union of the contexts of all catalogs.
#[must_use]
pub fn audit_set(set: &CatalogSet, reference: Option<&Catalog>, config: &AuditConfig) -> Report {
    let mut report = Report {
        catalogs: set.len() + set.load_errors().len(),
        treat_warnings_as_errors: config.treat_warnings_as_errors,
        ..Report::default()
    };

    for (path, err) in set.load_errors() {
        report.push(Finding::new(
            FindingKind::Unreadable,
            path.display().to_string(),
            err.to_string(),
        ));
    }

    for loaded in set.iter() {
        audit_catalog_into(
            &label(loaded),
            Some(&loaded.locale),
            &loaded.catalog,
            config,
            &mut report,
        );
    }

    if config.check_contexts {
        check_contexts(set, reference, &mut report);
    }

    tracing::debug!(
        catalogs = report.catalogs,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "audit finished"
    );
    report
}

/// Per-message checks of a single catalog.
///
/// Without a locale the numerus form count is not checked.
#[must_use]
pub fn audit_catalog(
    name: &str,
    locale: Option<&LanguageIdentifier>,
    catalog: &Catalog,
    config: &AuditConfig,
) -> Report {
    let mut report = Report {
        catalogs: 1,
        treat_warnings_as_errors: config.treat_warnings_as_errors,
        ..Report::default()
    };
    audit_catalog_into(name, locale, catalog, config, &mut report);
    report
}

fn label(loaded: &LoadedCatalog) -> String {
    loaded
        .path
        .as_ref()
        .map_or_else(|| loaded.locale.to_string(), |p| p.display().to_string())
}

fn audit_catalog_into(
    name: &str,
    locale: Option<&LanguageIdentifier>,
    catalog: &Catalog,
    config: &AuditConfig,
    report: &mut Report,
) {
    let plural = locale.map(|l| PluralRule::for_language(l.language.as_str()));
    let mut seen: HashSet<(&str, &str, Option<&str>)> = HashSet::new();

    for (context, message) in catalog.messages() {
        if !message.translation.kind.is_live() {
            continue;
        }
        let finding = |kind, detail: String| {
            Finding::new(kind, name, detail)
                .in_context(context)
                .for_source(&message.source)
        };

        if !seen.insert((context, message.source.as_str(), message.comment.as_deref())) {
            report.push(finding(
                FindingKind::DuplicateSource,
                "source appears more than once in this context".to_string(),
            ));
        }

        if config.flag_empty_translations
            && message.translation.kind == TranslationKind::Finished
            && message.translation.is_empty()
        {
            report.push(finding(
                FindingKind::EmptyFinished,
                "empty translation is not marked unfinished; the source is shown".to_string(),
            ));
        }

        if config.check_placeholders {
            if let Some(detail) = placeholder_problem(message) {
                report.push(finding(FindingKind::PlaceholderMismatch, detail));
            }
        }

        if config.check_numerus {
            if let (Some(rule), TranslationBody::Numerus(forms)) = (plural, &message.translation.body) {
                if !message.translation.is_empty() && forms.len() != rule.form_count() {
                    report.push(finding(
                        FindingKind::NumerusFormCount,
                        format!(
                            "{} numerus form(s), the language uses {}",
                            forms.len(),
                            rule.form_count()
                        ),
                    ));
                }
            }
        }
    }
}

/// Describes the token difference of a finished translation, if any.
fn placeholder_problem(message: &Message) -> Option<String> {
    if message.translation.kind != TranslationKind::Finished {
        return None;
    }
    let source = placeholder::extract(&message.source);

    match &message.translation.body {
        TranslationBody::Text(text) if !text.is_empty() => {
            placeholder::compare_sets(&source, &placeholder::extract(text))
                .map(|m| describe(&m.missing, &m.extra))
        }
        TranslationBody::Numerus(forms) => forms
            .iter()
            .enumerate()
            .filter(|(_, form)| !form.is_empty())
            .find_map(|(index, form)| {
                let mismatch = placeholder::compare_sets(&source, &placeholder::extract(form))?;
                // A form may spell the quantity out instead of using %n.
                let missing: Vec<Placeholder> = mismatch
                    .missing
                    .into_iter()
                    .filter(|p| *p != Placeholder::Numerus)
                    .collect();
                if missing.is_empty() && mismatch.extra.is_empty() {
                    None
                } else {
                    Some(format!("form {index}: {}", describe(&missing, &mismatch.extra)))
                }
            }),
        TranslationBody::Text(_) => None,
    }
}

fn describe(missing: &[Placeholder], extra: &[Placeholder]) -> String {
    let join = |tokens: &[Placeholder]| {
        tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    match (missing.is_empty(), extra.is_empty()) {
        (false, true) => format!("missing {}", join(missing)),
        (true, false) => format!("unexpected {}", join(extra)),
        _ => format!("missing {}; unexpected {}", join(missing), join(extra)),
    }
}

fn check_contexts(set: &CatalogSet, reference: Option<&Catalog>, report: &mut Report) {
    let expected: BTreeSet<&str> = match reference {
        Some(reference) => reference.context_names().into_iter().collect(),
        None => set
            .iter()
            .flat_map(|loaded| loaded.catalog.context_names())
            .collect(),
    };

    for loaded in set.iter() {
        let name = label(loaded);
        let present: BTreeSet<&str> = loaded.catalog.context_names().into_iter().collect();

        if reference.is_some() {
            for context in present.difference(&expected) {
                report.push(
                    Finding::new(
                        FindingKind::ContextNotInReference,
                        name.as_str(),
                        "context does not exist in the reference catalog",
                    )
                    .in_context(*context),
                );
            }
        }
        for context in expected.difference(&present) {
            report.push(
                Finding::new(FindingKind::ContextMissing, name.as_str(), "context is missing")
                    .in_context(*context),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Translation;

    fn lid(s: &str) -> LanguageIdentifier {
        s.parse().unwrap()
    }

    fn catalog_with(context: &str, messages: Vec<Message>) -> Catalog {
        let mut catalog = Catalog::default();
        catalog.context_mut_or_insert(context).messages = messages;
        catalog
    }

    fn kinds(report: &Report) -> Vec<FindingKind> {
        report.findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        let catalog = catalog_with(
            "AcfLogReader",
            vec![
                Message::new("Ready", Translation::finished("Klar")),
                Message::new(
                    "Loaded {count} entries",
                    Translation::finished("Indlæste {count} poster"),
                ),
            ],
        );
        let report = audit_catalog("da.ts", Some(&lid("da")), &catalog, &AuditConfig::default());
        assert!(report.findings.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn placeholder_mismatch_is_an_error() {
        let catalog = catalog_with(
            "ModInfo",
            vec![Message::new(
                "Uploaded to {url}",
                Translation::finished("Téléversé vers {lien}"),
            )],
        );
        let report = audit_catalog("fr.ts", None, &catalog, &AuditConfig::default());
        assert_eq!(kinds(&report), vec![FindingKind::PlaceholderMismatch]);
        assert_eq!(report.findings[0].detail, "missing {url}; unexpected {lien}");
        assert!(report.has_errors());
    }

    #[test]
    fn unfinished_translations_are_not_compared() {
        let mut draft = Translation::finished("Téléversé");
        draft.kind = TranslationKind::Unfinished;
        let catalog = catalog_with("ModInfo", vec![Message::new("Uploaded to {url}", draft)]);
        let report = audit_catalog("fr.ts", None, &catalog, &AuditConfig::default());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn empty_finished_translation_is_flagged() {
        let catalog = catalog_with(
            "BaseModsPanel",
            vec![Message::new("Do nothing and exit", Translation::finished(""))],
        );
        let report = audit_catalog("da.ts", None, &catalog, &AuditConfig::default());
        assert_eq!(kinds(&report), vec![FindingKind::EmptyFinished]);
        assert!(!report.has_errors());

        let quiet = AuditConfig {
            flag_empty_translations: false,
            ..AuditConfig::default()
        };
        assert!(audit_catalog("da.ts", None, &catalog, &quiet).findings.is_empty());
    }

    #[test]
    fn duplicate_source_is_flagged_once_per_repeat() {
        let catalog = catalog_with(
            "MainWindow",
            vec![
                Message::new("Open", Translation::finished("Åbn")),
                Message::new("Open", Translation::finished("Åbn")),
            ],
        );
        let report = audit_catalog("da.ts", None, &catalog, &AuditConfig::default());
        assert_eq!(kinds(&report), vec![FindingKind::DuplicateSource]);
    }

    #[test]
    fn same_source_with_different_comment_is_not_duplicate() {
        let mut verb = Message::new("Open", Translation::finished("Åbn"));
        verb.comment = Some("verb".into());
        let catalog = catalog_with(
            "MainWindow",
            vec![Message::new("Open", Translation::finished("Åben")), verb],
        );
        let report = audit_catalog("da.ts", None, &catalog, &AuditConfig::default());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn numerus_forms_may_omit_count() {
        let catalog = catalog_with(
            "ModsPanel",
            vec![Message::new(
                "%n mod(s) selected",
                Translation::numerus(
                    TranslationKind::Finished,
                    vec!["un mod sélectionné".into(), "%n mods sélectionnés".into()],
                ),
            )],
        );
        let report = audit_catalog("fr.ts", Some(&lid("fr")), &catalog, &AuditConfig::default());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn numerus_form_count_follows_plural_rule() {
        let catalog = catalog_with(
            "ModsPanel",
            vec![Message::new(
                "%n mod(s)",
                Translation::numerus(TranslationKind::Finished, vec!["%n mod".into(), "%n mods".into()]),
            )],
        );
        let report = audit_catalog("ru.ts", Some(&lid("ru")), &catalog, &AuditConfig::default());
        assert_eq!(kinds(&report), vec![FindingKind::NumerusFormCount]);
        assert_eq!(report.findings[0].detail, "2 numerus form(s), the language uses 3");
    }

    #[test]
    fn vanished_messages_are_ignored() {
        let mut gone = Translation::finished("");
        gone.kind = TranslationKind::Vanished;
        let catalog = catalog_with("Old", vec![Message::new("Removed {x}", gone)]);
        let report = audit_catalog("da.ts", None, &catalog, &AuditConfig::default());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn contexts_compared_with_union() {
        let mut set = CatalogSet::new();
        set.insert(lid("da"), catalog_with("AcfLogReader", vec![]));
        let mut french = catalog_with("AcfLogReader", vec![]);
        french.context_mut_or_insert("AboutDialog");
        set.insert(lid("fr"), french);

        let report = audit_set(&set, None, &AuditConfig::default());
        assert_eq!(kinds(&report), vec![FindingKind::ContextMissing]);
        assert_eq!(report.findings[0].catalog, "da");
        assert_eq!(report.findings[0].context.as_deref(), Some("AboutDialog"));
        assert_eq!(report.catalogs, 2);
    }

    #[test]
    fn contexts_compared_with_reference() {
        let reference = catalog_with("AcfLogReader", vec![]);
        let mut set = CatalogSet::new();
        set.insert(lid("da"), catalog_with("LegacyPanel", vec![]));

        let report = audit_set(&set, Some(&reference), &AuditConfig::default());
        assert_eq!(
            kinds(&report),
            vec![FindingKind::ContextNotInReference, FindingKind::ContextMissing]
        );
    }

    #[test]
    fn context_check_can_be_disabled() {
        let reference = catalog_with("AcfLogReader", vec![]);
        let mut set = CatalogSet::new();
        set.insert(lid("da"), catalog_with("LegacyPanel", vec![]));
        let config = AuditConfig {
            check_contexts: false,
            ..AuditConfig::default()
        };
        assert!(audit_set(&set, Some(&reference), &config).findings.is_empty());
    }
}
