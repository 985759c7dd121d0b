// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;

use tempfile::tempdir;
use ts_lens::audit::{self, FindingKind};
use ts_lens::config::{self, Config};
use ts_lens::export::{self, ExportFormat};
use ts_lens::i18n::{fingerprint, CatalogSet, Translator};
use ts_lens::placeholder::FormatArgs;
use ts_lens::ts;
use unic_langid::LanguageIdentifier;

fn data(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(path)
}

fn lid(s: &str) -> LanguageIdentifier {
    s.parse().expect("valid locale")
}

fn catalogs() -> CatalogSet {
    CatalogSet::load_dir(data("i18n")).expect("fixture directory loads")
}

fn translator(lang: &str) -> Translator {
    Translator::new(catalogs(), Some(lang.to_string()), &Config::default())
}

#[test]
fn test_lookup_returns_danish_translation() {
    let translator = translator("da");
    assert_eq!(translator.current_locale(), Some(&lid("da")));
    assert_eq!(translator.tr("AcfLogReader", "Ready"), "Klar");
}

#[test]
fn test_empty_translation_falls_back_to_source() {
    let translator = translator("da");
    assert_eq!(
        translator.tr("BaseModsPanel", "Foretag ingen handling, og afslut"),
        "Foretag ingen handling, og afslut"
    );
    assert_eq!(translator.tr("AcfLogReader", "Refresh"), "Refresh");
}

#[test]
fn test_region_locale_matches_language_catalog() {
    let translator = translator("fr");
    assert_eq!(translator.current_locale(), Some(&lid("fr-FR")));
    assert_eq!(translator.tr("SettingsDialog", "Apply"), "Appliquer");
}

#[test]
fn test_interpolation_and_plural_forms() {
    let da = translator("da");
    let args = FormatArgs::new().with("count", 3).with("time", "1.5");
    assert_eq!(
        da.tr_args("AcfLogReader", "Loaded {count} entries in {time}s", &args),
        "Indlæste 3 poster på 1.5s"
    );
    assert_eq!(
        da.tr_plural("ModsPanel", "%n mod(s) selected", 1, &FormatArgs::new()),
        "1 mod valgt"
    );
    assert_eq!(
        da.tr_plural("ModsPanel", "%n mod(s) selected", 0, &FormatArgs::new()),
        "0 mods valgt"
    );

    let fr = translator("fr_FR");
    assert_eq!(
        fr.tr_plural("ModsPanel", "%n mod(s) selected", 0, &FormatArgs::new()),
        "0 mod sélectionné"
    );
}

#[test]
fn test_dotted_placeholder_is_substituted() {
    let translator = translator("da");
    let args = FormatArgs::new().with("rentry_uploader.url", "https://rentry.co/abc");
    assert_eq!(
        translator.tr_args("ModsPanel", "Uploaded to {rentry_uploader.url}", &args),
        "Uploadet til https://rentry.co/abc"
    );
}

#[test]
fn test_runtime_locale_switch() {
    let mut translator = translator("da");
    assert!(translator.set_locale(&lid("fr-FR")));
    assert_eq!(translator.tr("AcfLogReader", "Ready"), "Prêt");
    assert!(!translator.set_locale(&lid("de")));
    assert_eq!(translator.tr("AcfLogReader", "Ready"), "Prêt");
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("da".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");
    let loaded = config::load_from_path(&temp_config_file_path).expect("Failed to load config");
    let danish = Translator::new(catalogs(), None, &loaded);
    assert_eq!(danish.current_locale(), Some(&lid("da")));

    let mut french_config = loaded.clone();
    french_config.general.language = Some("fr_FR".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");
    let loaded = config::load_from_path(&temp_config_file_path).expect("Failed to load config");
    let french = Translator::new(catalogs(), None, &loaded);
    assert_eq!(french.current_locale(), Some(&lid("fr-FR")));

    // The command line wins over the config file.
    let cli = Translator::new(catalogs(), Some("da".into()), &loaded);
    assert_eq!(cli.current_locale(), Some(&lid("da")));

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_round_trip_preserves_triples_and_fingerprint() {
    let original = ts::parse_file(data("i18n/da.ts")).expect("parse fixture");
    let written = ts::to_string(&original).expect("serialize");
    let reparsed = ts::parse_str(&written).expect("reparse");

    assert_eq!(original.triples(), reparsed.triples());
    assert_eq!(original, reparsed);
    assert_eq!(fingerprint(&original), fingerprint(&reparsed));
    assert_eq!(ts::to_string(&reparsed).expect("serialize again"), written);
}

#[test]
fn test_fingerprint_is_stable_across_loads() {
    let first = ts::parse_file(data("i18n/fr_FR.ts")).expect("parse");
    let second = ts::parse_file(data("i18n/fr_FR.ts")).expect("parse");
    assert_eq!(fingerprint(&first), fingerprint(&second));

    let danish = ts::parse_file(data("i18n/da.ts")).expect("parse");
    assert_ne!(fingerprint(&first), fingerprint(&danish));
}

#[test]
fn test_contexts_are_locale_invariant() {
    let set = catalogs();
    let reference = ts::parse_file(data("reference.ts")).expect("parse reference");
    let names: Vec<Vec<&str>> = set.iter().map(|c| c.catalog.context_names()).collect();
    assert!(names.iter().all(|n| *n == reference.context_names()));

    let report = audit::audit_set(&set, Some(&reference), &Config::default().audit);
    assert_eq!(report.of_kind(FindingKind::ContextMissing).count(), 0);
    assert_eq!(report.of_kind(FindingKind::ContextNotInReference).count(), 0);
}

#[test]
fn test_audit_reports_fixture_problems() {
    let set = catalogs();
    let report = audit::audit_set(&set, None, &Config::default().audit);

    let mismatches: Vec<_> = report.of_kind(FindingKind::PlaceholderMismatch).collect();
    assert_eq!(mismatches.len(), 1);
    assert!(mismatches[0].catalog.ends_with("fr_FR.ts"));
    assert_eq!(
        mismatches[0].source.as_deref(),
        Some("Uploaded to {rentry_uploader.url}")
    );

    let empty: Vec<_> = report.of_kind(FindingKind::EmptyFinished).collect();
    assert_eq!(empty.len(), 1);
    assert!(empty[0].catalog.ends_with("da.ts"));
    assert_eq!(empty[0].context.as_deref(), Some("BaseModsPanel"));

    assert!(report.has_errors());
    assert_eq!(report.catalogs, 2);
}

#[test]
fn test_exports_of_fixture() {
    let catalog = ts::parse_file(data("i18n/da.ts")).expect("parse");

    let po = export::export(&catalog, ExportFormat::Po).expect("po");
    assert!(po.contains("msgctxt \"AcfLogReader\"\nmsgid \"Ready\"\nmsgstr \"Klar\"\n"));
    assert!(po.contains("#~ msgid \"Legacy option\"\n"));

    let json = export::export(&catalog, ExportFormat::Json).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["AcfLogReader"]["Ready"], "Klar");
    assert!(value.get("BaseModsPanel").is_none());

    let ftl = export::export(&catalog, ExportFormat::Fluent).expect("ftl");
    assert!(ftl.contains("acf-log-reader-ready = Klar\n"));
    assert!(ftl.contains("{ $rentry_uploader-url }"));
}
