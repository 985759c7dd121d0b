// SPDX-License-Identifier: MPL-2.0
//! Placeholder tokens embedded in source and translation strings.
//!
//! The catalogs mix three conventions:
//!
//! - Python `str.format` fields: `{count}`, `{path.name}`, `{rentry_uploader.url}`,
//!   positional `{}` / `{0}`, with optional `!r` conversion and `:>5` spec.
//!   `{{` and `}}` are escapes.
//! - Qt markers: `%1`..`%99`, locale-aware `%L1`, and `%n` in numerus messages.
//! - printf specifiers: `%s`, `%5.2f`, named `%(name)s`. `%%` is an escape.
//!
//! [`extract`] turns a string into a [`PlaceholderSet`] so that a translation
//! can be checked against its source, and [`interpolate`] renders a template
//! with caller-supplied values.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{\{|\}\}",
        r"|\{(?P<field>[A-Za-z0-9_.\[\]]*)(?:![rsa])?(?::[^{}]*)?\}",
        r"|%%",
        // printf before Qt: `%5.2f` and `%10s` carry a width, not a marker
        r"|%\((?P<pname>[A-Za-z_][A-Za-z0-9_]*)\)[-+0#]*[0-9]*(?:\.[0-9]+)?(?P<pnconv>[sdifeEgGxXocr])",
        r"|%[-+0#]*[0-9]*(?:\.[0-9]+)?(?P<conv>[sdifeEgGxXoc])",
        r"|%L?(?P<qt>[1-9][0-9]?)",
        r"|%L?n",
    ))
    .unwrap_or_else(|e| unreachable!("placeholder pattern is static: {e}"))
});

/// A substitution token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// `{name}`. Bare `{}` fields are numbered in order of appearance, like
    /// Python's automatic field numbering, so `{}` becomes `"0"`, `"1"`, ...
    Brace(String),
    /// Qt `%1`..`%99` (`%L1` counts as `%1`).
    Qt(u8),
    /// Qt `%n` in numerus messages.
    Numerus,
    /// Anonymous printf specifier, by position among printf specifiers.
    Printf { position: usize, conversion: char },
    /// `%(name)s`.
    NamedPrintf { name: String, conversion: char },
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Brace(name) => write!(f, "{{{}}}", name),
            Placeholder::Qt(n) => write!(f, "%{}", n),
            Placeholder::Numerus => write!(f, "%n"),
            Placeholder::Printf { conversion, .. } => write!(f, "%{}", conversion),
            Placeholder::NamedPrintf { name, conversion } => {
                write!(f, "%({}){}", name, conversion)
            }
        }
    }
}

/// A piece of a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as-is.
    Literal(&'a str),
    /// `{{`, `}}` or `%%`; `raw` is the escape, `text` what it stands for.
    Escape { raw: &'a str, text: &'static str },
    /// A placeholder token and its exact spelling in the template.
    Token { placeholder: Placeholder, raw: &'a str },
}

/// Splits `text` into literals, escapes and placeholder tokens.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    let mut auto_field = 0usize;
    let mut printf_position = 0usize;

    for caps in TOKEN_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Segment::Literal(&text[last..whole.start()]));
        }
        last = whole.end();
        let raw = whole.as_str();

        let segment = match raw {
            "{{" => Segment::Escape { raw, text: "{" },
            "}}" => Segment::Escape { raw, text: "}" },
            "%%" => Segment::Escape { raw, text: "%" },
            _ => Segment::Token {
                placeholder: classify(&caps, raw, &mut auto_field, &mut printf_position),
                raw,
            },
        };
        out.push(segment);
    }
    if last < text.len() {
        out.push(Segment::Literal(&text[last..]));
    }
    out
}

fn classify(caps: &Captures<'_>, raw: &str, auto_field: &mut usize, printf: &mut usize) -> Placeholder {
    if let Some(field) = caps.name("field") {
        let name = field.as_str();
        if name.is_empty() {
            let index = *auto_field;
            *auto_field += 1;
            return Placeholder::Brace(index.to_string());
        }
        return Placeholder::Brace(name.to_string());
    }
    if let Some(qt) = caps.name("qt") {
        // at most two digits, so this always fits
        let n = qt.as_str().parse::<u8>().unwrap_or(u8::MAX);
        return Placeholder::Qt(n);
    }
    if let Some(name) = caps.name("pname") {
        let conversion = last_char(caps.name("pnconv").map(|m| m.as_str()));
        return Placeholder::NamedPrintf {
            name: name.as_str().to_string(),
            conversion,
        };
    }
    if let Some(conv) = caps.name("conv") {
        let position = *printf;
        *printf += 1;
        return Placeholder::Printf {
            position,
            conversion: last_char(Some(conv.as_str())),
        };
    }
    debug_assert!(raw.ends_with('n'));
    Placeholder::Numerus
}

fn last_char(s: Option<&str>) -> char {
    s.and_then(|s| s.chars().last()).unwrap_or('s')
}

/// Ordered set of placeholder tokens used by a string.
pub type PlaceholderSet = BTreeSet<Placeholder>;

/// Collects the placeholder tokens of `text`.
#[must_use]
pub fn extract(text: &str) -> PlaceholderSet {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Token { placeholder, .. } => Some(placeholder),
            _ => None,
        })
        .collect()
}

/// Tokens a translation lacks or adds relative to its source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceholderMismatch {
    /// In the source, absent from the translation.
    pub missing: Vec<Placeholder>,
    /// In the translation, absent from the source.
    pub extra: Vec<Placeholder>,
}

impl PlaceholderMismatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compares the token sets of `source` and `translation`.
///
/// Returns `None` when both use exactly the same tokens.
#[must_use]
pub fn compare(source: &str, translation: &str) -> Option<PlaceholderMismatch> {
    compare_sets(&extract(source), &extract(translation))
}

/// Set-level variant of [`compare`].
#[must_use]
pub fn compare_sets(source: &PlaceholderSet, translation: &PlaceholderSet) -> Option<PlaceholderMismatch> {
    let mismatch = PlaceholderMismatch {
        missing: source.difference(translation).cloned().collect(),
        extra: translation.difference(source).cloned().collect(),
    };
    (!mismatch.is_empty()).then_some(mismatch)
}

/// Values substituted by [`interpolate`].
///
/// Dotted fields such as `{path.name}` are looked up by their full dotted
/// name, so the caller renders `path.name` itself and registers it under
/// that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatArgs {
    named: BTreeMap<String, String>,
    positional: Vec<String>,
    count: Option<u64>,
}

impl FormatArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named value for `{key}` / `%(key)s`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.named.insert(key.into(), value.to_string());
        self
    }

    /// Appends a positional value for `{}` / `{0}`, `%1` or `%s`.
    #[must_use]
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Sets the quantity substituted for `%n`.
    #[must_use]
    pub fn count(mut self, n: u64) -> Self {
        self.count = Some(n);
        self
    }

    #[must_use]
    pub fn get_count(&self) -> Option<u64> {
        self.count
    }

    fn resolve(&self, placeholder: &Placeholder) -> Option<String> {
        match placeholder {
            Placeholder::Brace(name) => match name.parse::<usize>() {
                Ok(index) => self.positional.get(index).cloned(),
                Err(_) => self.named.get(name).cloned(),
            },
            Placeholder::Qt(n) => self.positional.get(usize::from(*n).checked_sub(1)?).cloned(),
            Placeholder::Numerus => self.count.map(|n| n.to_string()),
            Placeholder::Printf { position, .. } => self.positional.get(*position).cloned(),
            Placeholder::NamedPrintf { name, .. } => self.named.get(name).cloned(),
        }
    }
}

/// Renders `template`, replacing every token with its value from `args`.
///
/// Tokens without a value are kept verbatim. Brace escapes always collapse;
/// `%%` collapses only when the template also uses printf specifiers, since
/// `str.format` templates keep it literally.
#[must_use]
pub fn interpolate(template: &str, args: &FormatArgs) -> String {
    let parts = segments(template);
    let printf_style = parts.iter().any(|segment| {
        matches!(
            segment,
            Segment::Token {
                placeholder: Placeholder::Printf { .. } | Placeholder::NamedPrintf { .. },
                ..
            }
        )
    });

    let mut out = String::with_capacity(template.len());
    for segment in parts {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Escape { raw: "%%", .. } if !printf_style => out.push_str("%%"),
            Segment::Escape { text, .. } => out.push_str(text),
            Segment::Token { placeholder, raw } => match args.resolve(&placeholder) {
                Some(value) => out.push_str(&value),
                None => {
                    tracing::warn!(token = raw, "no value for placeholder");
                    out.push_str(raw);
                }
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brace(name: &str) -> Placeholder {
        Placeholder::Brace(name.to_string())
    }

    #[test]
    fn extracts_named_and_dotted_fields() {
        let set = extract("Uploaded to {rentry_uploader.url} in {time}s ({path.name})");
        let expected: PlaceholderSet =
            [brace("rentry_uploader.url"), brace("time"), brace("path.name")].into();
        assert_eq!(set, expected);
    }

    #[test]
    fn format_spec_and_conversion_are_ignored() {
        assert_eq!(extract("{count:>5} {e!r}"), [brace("count"), brace("e")].into());
    }

    #[test]
    fn brace_escapes_are_not_placeholders() {
        assert!(extract("Use {{name}} literally").is_empty());
    }

    #[test]
    fn auto_numbered_fields_match_explicit_indices() {
        assert_eq!(extract("{} of {}"), extract("{0} of {1}"));
    }

    #[test]
    fn prose_in_braces_is_not_a_field() {
        assert!(extract("a { weird } text").is_empty());
    }

    #[test]
    fn qt_markers() {
        assert_eq!(
            extract("%1 mods, %L2 bytes, %n files"),
            [Placeholder::Qt(1), Placeholder::Qt(2), Placeholder::Numerus].into()
        );
        assert_eq!(extract("%12"), [Placeholder::Qt(12)].into());
    }

    #[test]
    fn printf_specifiers_keep_their_order() {
        let source = extract("%s of %d");
        let swapped = extract("%d of %s");
        assert_ne!(source, swapped);
        assert!(extract("100%% done").is_empty());
        assert_eq!(
            extract("%(count)d items"),
            [Placeholder::NamedPrintf {
                name: "count".into(),
                conversion: 'd'
            }]
            .into()
        );
    }

    #[test]
    fn printf_width_is_not_a_qt_marker() {
        assert_eq!(
            extract("%5.2f"),
            [Placeholder::Printf {
                position: 0,
                conversion: 'f'
            }]
            .into()
        );
        assert_eq!(
            extract("%10s"),
            [Placeholder::Printf {
                position: 0,
                conversion: 's'
            }]
            .into()
        );
        assert_eq!(extract("%10 of %2"), [Placeholder::Qt(10), Placeholder::Qt(2)].into());
    }

    #[test]
    fn interpolate_printf_with_width() {
        let args = FormatArgs::new().arg(3.14159).arg("done");
        assert_eq!(
            interpolate("Took %5.2f seconds, %10s", &args),
            "Took 3.14159 seconds, done"
        );
    }

    #[test]
    fn compare_reports_missing_and_extra() {
        let mismatch = compare("{count} mods in {time}", "{count} mods i {tid}")
            .expect("should mismatch");
        assert_eq!(mismatch.missing, vec![brace("time")]);
        assert_eq!(mismatch.extra, vec![brace("tid")]);
    }

    #[test]
    fn compare_accepts_reordered_tokens() {
        assert!(compare("{count} in {time}", "På {time}: {count}").is_none());
    }

    #[test]
    fn segments_preserve_text() {
        let text = "Error: {error_msg} (%1) {{x}}";
        let rebuilt: String = segments(text)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(t) => t.to_string(),
                Segment::Escape { raw, .. } | Segment::Token { raw, .. } => raw.to_string(),
            })
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn interpolate_named_positional_and_count() {
        let args = FormatArgs::new()
            .with("path.name", "About.xml")
            .arg("first")
            .count(3);
        assert_eq!(
            interpolate("{path.name}: %1, %n files", &args),
            "About.xml: first, 3 files"
        );
        assert_eq!(interpolate("{} / {0}", &args), "first / first");
    }

    #[test]
    fn interpolate_keeps_unknown_tokens() {
        assert_eq!(
            interpolate("Failed: {error_msg}", &FormatArgs::new()),
            "Failed: {error_msg}"
        );
    }

    #[test]
    fn interpolate_escapes() {
        let args = FormatArgs::new().with("n", 5).arg("x");
        assert_eq!(interpolate("{{{n}}}", &args), "{5}");
        assert_eq!(interpolate("100%% {n}", &args), "100%% 5");
        assert_eq!(interpolate("%s is 100%%", &args), "x is 100%");
    }
}
