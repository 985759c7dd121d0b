// SPDX-License-Identifier: MPL-2.0
//! Catalog, context and message types.
//!
//! These types mirror the Qt Linguist TS document tree. They carry enough
//! information to re-serialize a catalog (locations, comments, translation
//! state) while the lookup methods only ever serve finished, non-empty text.

use std::collections::BTreeMap;

/// TS schema version written when a catalog does not specify one.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// Separator Qt uses between numerus forms when it flattens them into one
/// string (the same byte appears in compiled `.qm` files).
pub const NUMERUS_SEPARATOR: char = '\u{9c}';

/// State of a `<translation>` element, from its `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TranslationKind {
    /// No `type` attribute: the translator considers the text done.
    #[default]
    Finished,
    /// `type="unfinished"`: no usable translation yet.
    Unfinished,
    /// `type="vanished"`: the source string is gone from the UI code.
    Vanished,
    /// `type="obsolete"`: pre-Qt 5 spelling of vanished.
    Obsolete,
}

impl TranslationKind {
    /// Parses the `type` attribute value. `None` for values outside the schema.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::Finished),
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// The `type` attribute value, or `None` for finished translations.
    #[must_use]
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether the message is still present in the UI code.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

/// Body of a `<translation>` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TranslationBody {
    /// Plain text content.
    Text(String),
    /// One `<numerusform>` per plural form, in the language's Qt form order.
    Numerus(Vec<String>),
}

impl Default for TranslationBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A `<translation>` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Translation {
    pub kind: TranslationKind,
    pub body: TranslationBody,
}

impl Translation {
    #[must_use]
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            kind: TranslationKind::Finished,
            body: TranslationBody::Text(text.into()),
        }
    }

    #[must_use]
    pub fn unfinished() -> Self {
        Self {
            kind: TranslationKind::Unfinished,
            body: TranslationBody::default(),
        }
    }

    #[must_use]
    pub fn numerus(kind: TranslationKind, forms: Vec<String>) -> Self {
        Self {
            kind,
            body: TranslationBody::Numerus(forms),
        }
    }

    /// Returns `true` when no text is present in any form.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.body {
            TranslationBody::Text(text) => text.is_empty(),
            TranslationBody::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// Plain text if this translation may be shown at runtime.
    ///
    /// Only finished, non-empty text translations qualify.
    #[must_use]
    pub fn servable_text(&self) -> Option<&str> {
        match (&self.kind, &self.body) {
            (TranslationKind::Finished, TranslationBody::Text(text)) if !text.is_empty() => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Numerus forms if this translation may be shown at runtime.
    #[must_use]
    pub fn servable_forms(&self) -> Option<&[String]> {
        match (&self.kind, &self.body) {
            (TranslationKind::Finished, TranslationBody::Numerus(forms)) if !self.is_empty() => {
                Some(forms)
            }
            _ => None,
        }
    }

    /// Every text piece of the body: one for plain text, one per numerus form.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match &self.body {
            TranslationBody::Text(text) => std::slice::from_ref(text),
            TranslationBody::Numerus(forms) => forms,
        };
        slice.iter().map(String::as_str)
    }

    /// Body flattened into one string, numerus forms joined by
    /// [`NUMERUS_SEPARATOR`].
    #[must_use]
    pub fn flattened(&self) -> String {
        match &self.body {
            TranslationBody::Text(text) => text.clone(),
            TranslationBody::Numerus(forms) => {
                let separator = NUMERUS_SEPARATOR.to_string();
                forms.join(&separator)
            }
        }
    }
}

/// `<location filename=".." line=".."/>`.
///
/// `line` is kept verbatim: lupdate writes absolute numbers or, in relative
/// mode, signed offsets such as `+3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub filename: String,
    pub line: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(filename: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            filename: filename.into(),
            line: line.map(|l| l.to_string()),
        }
    }
}

/// A `<message>` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Optional `id` attribute (id-based translations).
    pub id: Option<String>,
    pub locations: Vec<Location>,
    pub source: String,
    /// Previous source text kept by lupdate for fuzzy matches.
    pub old_source: Option<String>,
    /// Disambiguation comment (`<comment>`).
    pub comment: Option<String>,
    pub old_comment: Option<String>,
    /// Developer comment for translators (`<extracomment>`).
    pub extra_comment: Option<String>,
    /// Translator's own note (`<translatorcomment>`).
    pub translator_comment: Option<String>,
    pub translation: Translation,
    /// `<extra-*>` elements, name without the `extra-` prefix.
    pub extras: Vec<(String, String)>,
}

impl Message {
    #[must_use]
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            source: source.into(),
            translation,
            ..Self::default()
        }
    }

    /// Whether this is a `numerus="yes"` message.
    #[must_use]
    pub fn is_numerus(&self) -> bool {
        matches!(self.translation.body, TranslationBody::Numerus(_))
    }

    fn comment_matches(&self, comment: Option<&str>) -> bool {
        self.comment.as_deref().unwrap_or("") == comment.unwrap_or("")
    }
}

/// A `<context>` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First message with the given source and disambiguation comment.
    #[must_use]
    pub fn find(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment_matches(comment))
    }
}

/// One `(context, source, translation)` entry of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple<'a> {
    pub context: &'a str,
    pub source: &'a str,
    pub translation: &'a Translation,
}

/// A parsed TS document for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// `version` attribute of `<TS>`.
    pub version: String,
    /// `language` attribute of `<TS>` (e.g. `da`, `fr_FR`).
    pub language: Option<String>,
    /// `sourcelanguage` attribute of `<TS>`.
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(language: Option<String>) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// First context with this name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Every context with this name. Merged files can repeat a context.
    pub fn contexts_named<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Context> + use<'a, 'b> {
        self.contexts.iter().filter(move |c| c.name == name)
    }

    /// Returns the context with this name, appending an empty one if missing.
    pub fn context_mut_or_insert(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    /// Translated text for `source` in `context`, if a finished, non-empty
    /// translation exists. The first such duplicate wins.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.lookup_disambiguated(context, source, None)
    }

    /// Like [`lookup`](Self::lookup), matching the disambiguation comment
    /// first and then retrying without it.
    #[must_use]
    pub fn lookup_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&str> {
        self.find_servable(context, source, comment)
            .and_then(|m| m.translation.servable_text())
    }

    /// Numerus forms for `source` in `context`, if finished.
    #[must_use]
    pub fn lookup_forms(&self, context: &str, source: &str) -> Option<&[String]> {
        self.contexts_named(context)
            .flat_map(|c| c.messages.iter())
            .filter(|m| m.source == source)
            .find_map(|m| m.translation.servable_forms())
    }

    /// Translation with fallback to the source string.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup(context, source).unwrap_or(source)
    }

    fn find_servable(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let candidates = || {
            self.contexts_named(context)
                .flat_map(|c| c.messages.iter())
                .filter(move |m| m.source == source && m.translation.servable_text().is_some())
        };
        candidates()
            .find(|m| m.comment_matches(comment))
            .or_else(|| candidates().next())
    }

    /// All messages, paired with their context name.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c.name.as_str(), m)))
    }

    /// Every `(context, source, translation)` triple in document order.
    #[must_use]
    pub fn triples(&self) -> Vec<Triple<'_>> {
        self.messages()
            .map(|(context, m)| Triple {
                context,
                source: &m.source,
                translation: &m.translation,
            })
            .collect()
    }

    /// Runtime lookup table: `(context, source)` to the text that would be
    /// shown. Numerus forms are flattened with [`NUMERUS_SEPARATOR`].
    #[must_use]
    pub fn lookup_table(&self) -> BTreeMap<(String, String), String> {
        let mut table = BTreeMap::new();
        for (context, message) in self.messages() {
            let servable = message.translation.servable_text().is_some()
                || message.translation.servable_forms().is_some();
            if !servable {
                continue;
            }
            table
                .entry((context.to_string(), message.source.clone()))
                .or_insert_with(|| message.translation.flattened());
        }
        table
    }

    /// Names of all contexts, without duplicates, in document order.
    #[must_use]
    pub fn context_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for context in &self.contexts {
            if !names.contains(&context.name.as_str()) {
                names.push(&context.name);
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new(Some("da".into()));
        let ctx = catalog.context_mut_or_insert("AcfLogReader");
        ctx.messages.push(Message::new("Ready", Translation::finished("Klar")));
        ctx.messages.push(Message::new("Refresh", Translation::unfinished()));
        let panel = catalog.context_mut_or_insert("BaseModsPanel");
        panel
            .messages
            .push(Message::new("Foretag ingen handling, og afslut", Translation::finished("")));
        catalog
    }

    #[test]
    fn lookup_returns_finished_translation() {
        assert_eq!(sample().lookup("AcfLogReader", "Ready"), Some("Klar"));
    }

    #[test]
    fn unfinished_falls_back_to_source() {
        let catalog = sample();
        assert_eq!(catalog.lookup("AcfLogReader", "Refresh"), None);
        assert_eq!(catalog.translate("AcfLogReader", "Refresh"), "Refresh");
    }

    #[test]
    fn empty_finished_translation_falls_back_to_source() {
        let catalog = sample();
        let source = "Foretag ingen handling, og afslut";
        assert_eq!(catalog.translate("BaseModsPanel", source), source);
    }

    #[test]
    fn unknown_context_falls_back() {
        assert_eq!(sample().translate("Nope", "Ready"), "Ready");
    }

    #[test]
    fn first_finished_duplicate_wins() {
        let mut catalog = sample();
        let ctx = catalog.context_mut_or_insert("AcfLogReader");
        ctx.messages.push(Message::new("Ready", Translation::finished("Parat")));
        assert_eq!(catalog.lookup("AcfLogReader", "Ready"), Some("Klar"));
    }

    #[test]
    fn duplicate_context_blocks_are_searched() {
        let mut catalog = sample();
        let mut again = Context::new("AcfLogReader");
        again.messages.push(Message::new("Steam", Translation::finished("Damp")));
        catalog.contexts.push(again);
        assert_eq!(catalog.lookup("AcfLogReader", "Steam"), Some("Damp"));
        assert_eq!(catalog.context_names(), vec!["AcfLogReader", "BaseModsPanel"]);
    }

    #[test]
    fn disambiguation_comment_prefers_exact_match() {
        let mut catalog = Catalog::default();
        let ctx = catalog.context_mut_or_insert("Menu");
        let mut verb = Message::new("Open", Translation::finished("Åbn"));
        verb.comment = Some("verb".into());
        let mut adjective = Message::new("Open", Translation::finished("Åben"));
        adjective.comment = Some("adjective".into());
        ctx.messages.push(verb);
        ctx.messages.push(adjective);

        assert_eq!(
            catalog.lookup_disambiguated("Menu", "Open", Some("adjective")),
            Some("Åben")
        );
        assert_eq!(catalog.lookup("Menu", "Open"), Some("Åbn"));
    }

    #[test]
    fn vanished_translations_are_not_served() {
        let mut catalog = Catalog::default();
        let ctx = catalog.context_mut_or_insert("Old");
        ctx.messages.push(Message::new(
            "Gone",
            Translation {
                kind: TranslationKind::Vanished,
                body: TranslationBody::Text("Væk".into()),
            },
        ));
        assert_eq!(catalog.lookup("Old", "Gone"), None);
        assert!(catalog.lookup_table().is_empty());
    }

    #[test]
    fn lookup_table_flattens_numerus_forms() {
        let mut catalog = Catalog::default();
        let ctx = catalog.context_mut_or_insert("Files");
        ctx.messages.push(Message::new(
            "%n file(s)",
            Translation::numerus(
                TranslationKind::Finished,
                vec!["%n fil".into(), "%n filer".into()],
            ),
        ));
        let table = catalog.lookup_table();
        let value = &table[&("Files".to_string(), "%n file(s)".to_string())];
        assert_eq!(value, "%n fil\u{9c}%n filer");
        assert_eq!(
            catalog.lookup_forms("Files", "%n file(s)").map(<[String]>::len),
            Some(2)
        );
    }

    #[test]
    fn lookups_outlive_the_query_strings() {
        let catalog = sample();
        let (text, forms) = {
            let context = String::from("AcfLogReader");
            let source = String::from("Ready");
            (
                catalog.lookup(&context, &source),
                catalog.lookup_forms(&context, &source),
            )
        };
        assert_eq!(text, Some("Klar"));
        assert_eq!(forms, None);
    }

    #[test]
    fn translation_kind_attribute_mapping() {
        assert_eq!(
            TranslationKind::from_attribute("unfinished"),
            Some(TranslationKind::Unfinished)
        );
        assert_eq!(TranslationKind::from_attribute("draft"), None);
        assert_eq!(TranslationKind::Finished.as_attribute(), None);
        assert!(!TranslationKind::Obsolete.is_live());
    }

    #[test]
    fn triples_follow_document_order() {
        let catalog = sample();
        let sources: Vec<&str> = catalog.triples().iter().map(|t| t.source).collect();
        assert_eq!(
            sources,
            vec!["Ready", "Refresh", "Foretag ingen handling, og afslut"]
        );
    }
}
