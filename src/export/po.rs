// SPDX-License-Identifier: MPL-2.0
//! gettext PO output.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::domain::catalog::{Catalog, Message, TranslationBody, TranslationKind};
use crate::domain::plural::PluralRule;

/// Renders `catalog` as a PO file.
///
/// The context becomes `msgctxt`; a disambiguation comment is appended to it
/// as `context|comment`. Vanished and obsolete entries are written as `#~`
/// entries at the end of the file.
///
/// PO files allow one entry per `msgctxt`/`msgid`: the first message wins and
/// later duplicates are dropped with a warning.
#[must_use]
pub fn to_po(catalog: &Catalog) -> String {
    let mut out = header(catalog);
    let mut seen = HashSet::new();
    let mut obsolete = Vec::new();

    for (context, message) in catalog.messages() {
        if !message.translation.kind.is_live() {
            obsolete.push((context, message));
            continue;
        }
        if !seen.insert(entry_key(context, message)) {
            tracing::warn!(context, source = %message.source, "duplicate message left out of PO");
            continue;
        }
        out.push('\n');
        write_entry(&mut out, context, message, "");
    }
    for (context, message) in obsolete {
        if !seen.insert(entry_key(context, message)) {
            tracing::debug!(context, source = %message.source, "obsolete duplicate left out of PO");
            continue;
        }
        out.push('\n');
        write_entry(&mut out, context, message, "#~ ");
    }
    out
}

fn msgctxt(context: &str, message: &Message) -> String {
    match message.comment.as_deref() {
        Some(comment) if !comment.is_empty() => format!("{context}|{comment}"),
        _ => context.to_string(),
    }
}

fn entry_key(context: &str, message: &Message) -> (String, String) {
    (msgctxt(context, message), message.source.clone())
}

fn header(catalog: &Catalog) -> String {
    let mut fields = vec![
        "Content-Type: text/plain; charset=UTF-8".to_string(),
        "Content-Transfer-Encoding: 8bit".to_string(),
    ];
    if let Some(language) = &catalog.language {
        fields.push(format!("Language: {language}"));
        let rule = PluralRule::for_language(language);
        fields.push(format!("Plural-Forms: {}", rule.gettext_plural_forms()));
    }
    if let Some(source) = &catalog.source_language {
        fields.push(format!("X-Source-Language: {source}"));
    }

    let mut out = String::from("msgid \"\"\nmsgstr \"\"\n");
    for field in fields {
        let _ = writeln!(out, "\"{}\\n\"", escape(&field));
    }
    out
}

fn write_entry(out: &mut String, context: &str, message: &Message, prefix: &str) {
    if let Some(extra) = &message.extra_comment {
        for line in extra.lines() {
            let _ = writeln!(out, "#. {line}");
        }
    }
    if let Some(note) = &message.translator_comment {
        for line in note.lines() {
            let _ = writeln!(out, "# {line}");
        }
    }
    if !message.locations.is_empty() {
        let refs: Vec<String> = message
            .locations
            .iter()
            .map(|loc| match loc.line.as_deref() {
                // Relative offsets (`+3`) mean nothing outside the TS file.
                Some(line) if line.bytes().all(|b| b.is_ascii_digit()) => {
                    format!("{}:{line}", loc.filename)
                }
                _ => loc.filename.clone(),
            })
            .collect();
        let _ = writeln!(out, "#: {}", refs.join(" "));
    }
    let translation = &message.translation;
    if translation.kind == TranslationKind::Unfinished && !translation.is_empty() {
        out.push_str("#, fuzzy\n");
    }

    let _ = writeln!(out, "{prefix}msgctxt \"{}\"", escape(&msgctxt(context, message)));
    let _ = writeln!(out, "{prefix}msgid \"{}\"", escape(&message.source));

    match &translation.body {
        TranslationBody::Text(text) => {
            let _ = writeln!(out, "{prefix}msgstr \"{}\"", escape(text));
        }
        TranslationBody::Numerus(forms) => {
            let _ = writeln!(out, "{prefix}msgid_plural \"{}\"", escape(&message.source));
            if forms.is_empty() {
                let _ = writeln!(out, "{prefix}msgstr[0] \"\"");
            }
            for (index, form) in forms.iter().enumerate() {
                let _ = writeln!(out, "{prefix}msgstr[{index}] \"{}\"", escape(form));
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
