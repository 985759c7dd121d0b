// SPDX-License-Identifier: MPL-2.0
//! Locale identifiers as they appear in TS files, file names and the OS.

use unic_langid::LanguageIdentifier;

/// Parses `da`, `fr_FR`, `pt-BR` or `da_DK.UTF-8` into a language identifier.
#[must_use]
pub fn parse_locale(code: &str) -> Option<LanguageIdentifier> {
    let code = code.trim();
    let code = code.split(['.', '@']).next().unwrap_or_default();
    if code.is_empty() {
        return None;
    }
    code.replace('_', "-").parse::<LanguageIdentifier>().ok()
}

/// Derives the locale from a catalog file stem.
///
/// Accepts bare locales (`da`, `fr_FR`) and Qt's `<app>_<locale>` naming
/// (`rimsort_fr_FR`). Subtags after the language must be written in their
/// canonical case (`FR`, `Hant`) so that `app_da` is not read as
/// language `app`, region `DA`.
#[must_use]
pub fn locale_from_file_stem(stem: &str) -> Option<LanguageIdentifier> {
    let parts: Vec<&str> = stem.split(['_', '-']).collect();
    (0..parts.len()).find_map(|start| {
        let candidate = &parts[start..];
        if looks_like_locale(candidate) {
            parse_locale(&candidate.join("-"))
        } else {
            None
        }
    })
}

fn looks_like_locale(parts: &[&str]) -> bool {
    let Some((language, rest)) = parts.split_first() else {
        return false;
    };
    let language_ok = (2..=3).contains(&language.len())
        && language.chars().all(|c| c.is_ascii_lowercase());
    language_ok && rest.iter().all(|subtag| is_canonical_subtag(subtag))
}

fn is_canonical_subtag(subtag: &str) -> bool {
    let mut chars = subtag.chars();
    match subtag.len() {
        2 => subtag.chars().all(|c| c.is_ascii_uppercase()),
        3 => subtag.chars().all(|c| c.is_ascii_digit()),
        4 => {
            chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}

/// Formats a locale the way TS files spell it (`fr_FR`).
#[must_use]
pub fn to_ts_code(locale: &LanguageIdentifier) -> String {
    locale.to_string().replace('-', "_")
}

/// Whether two locales share their language subtag.
#[must_use]
pub fn same_language(a: &LanguageIdentifier, b: &LanguageIdentifier) -> bool {
    a.language == b.language
}
