// SPDX-License-Identifier: MPL-2.0
//! Fluent (`.ftl`) output.
//!
//! Message ids are `kebab(context)-kebab(source)`, with `-2`, `-3`, ...
//! appended on collision. Placeholders become Fluent variables:
//!
//! | Template        | Fluent            |
//! |-----------------|-------------------|
//! | `{path.name}`   | `{ $path-name }`  |
//! | `%(count)d`     | `{ $count }`      |
//! | `%1`, `{0}`, `%s` (first) | `{ $arg1 }` |
//! | `%n`            | `{ $n }`          |
//!
//! Positional tokens share one numbering: the k-th positional value is
//! `$argk` whichever syntax refers to it.

use std::collections::HashSet;

use fluent_bundle::FluentResource;

use crate::domain::catalog::{Catalog, Message, TranslationBody};
use crate::domain::plural::PluralRule;
use crate::error::{Error, Result};
use crate::placeholder::{segments, Placeholder, Segment};

/// Longest kebab-cased source kept in an id.
const MAX_SOURCE_ID_LEN: usize = 40;

const INDENT: &str = "    ";
const VARIANT_INDENT: &str = "            ";

/// Renders the servable translations of `catalog` as a Fluent resource.
///
/// The result is parsed back with [`FluentResource`] before it is returned.
pub fn to_ftl(catalog: &Catalog) -> Result<String> {
    let rule = catalog
        .language
        .as_deref()
        .map_or(PluralRule::OneOther, PluralRule::for_language);
    let mut ids = HashSet::new();
    let mut out = String::new();

    if let Some(language) = &catalog.language {
        out.push_str(&format!("### Language: {language}\n"));
    }

    for context in &catalog.contexts {
        let servable: Vec<&Message> = context
            .messages
            .iter()
            .filter(|m| {
                m.translation.servable_text().is_some() || m.translation.servable_forms().is_some()
            })
            .collect();
        if servable.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n", comment_text(&context.name)));

        for message in servable {
            let id = unique_id(&mut ids, message_id(&context.name, &message.source));
            out.push('\n');
            if let Some(extra) = &message.extra_comment {
                for line in extra.lines() {
                    if line.is_empty() {
                        out.push_str("#\n");
                    } else {
                        out.push_str(&format!("# {line}\n"));
                    }
                }
            }
            write_message(&mut out, &id, message, rule);
        }
    }

    if let Err((_, errors)) = FluentResource::try_new(out.clone()) {
        return Err(Error::Export(format!(
            "generated Fluent resource does not parse: {errors:?}"
        )));
    }
    tracing::debug!(messages = ids.len(), "rendered Fluent resource");
    Ok(out)
}

/// `kebab(context)-kebab(source)`, before collision handling.
#[must_use]
pub fn message_id(context: &str, source: &str) -> String {
    let parts: Vec<String> = [kebab(context, usize::MAX), kebab(source, MAX_SOURCE_ID_LEN)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    let id = parts.join("-");
    if id.starts_with(|c: char| c.is_ascii_alphabetic()) {
        id
    } else {
        format!("msg-{id}").trim_end_matches('-').to_string()
    }
}

fn unique_id(used: &mut HashSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Lower-case ASCII words joined by `-`; camel case starts a new word.
fn kebab(text: &str, max_len: usize) -> String {
    let mut out = String::new();
    let mut boundary = false;
    let mut prev_lower = false;
    for c in text.chars() {
        if out.len() >= max_len {
            break;
        }
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                boundary = true;
            }
            if boundary && !out.is_empty() {
                out.push('-');
            }
            boundary = false;
            out.push(c.to_ascii_lowercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            boundary = true;
            prev_lower = false;
        }
    }
    out
}

fn comment_text(text: &str) -> String {
    text.replace('\n', " ")
}

fn write_message(out: &mut String, id: &str, message: &Message, rule: PluralRule) {
    match &message.translation.body {
        TranslationBody::Text(text) => {
            out.push_str(&format!("{id} = {}\n", pattern(text, INDENT)));
        }
        TranslationBody::Numerus(forms) if forms.len() == 1 => {
            out.push_str(&format!("{id} = {}\n", pattern(&forms[0], INDENT)));
        }
        TranslationBody::Numerus(forms) => {
            out.push_str(&format!("{id} =\n{INDENT}{{ $n ->\n"));
            let variants = plural_variants(id, rule, forms);
            let last = variants.len().saturating_sub(1);
            for (index, (category, form)) in variants.iter().enumerate() {
                let marker = if index == last { "   *" } else { "    " };
                out.push_str(&format!(
                    "{INDENT}{marker}[{category}] {}\n",
                    pattern(form, VARIANT_INDENT)
                ));
            }
            out.push_str(&format!("{INDENT}}}\n"));
        }
    }
}

/// Pairs each numerus form with the CLDR category of its position.
///
/// Forms past the language's form count have no category and are dropped.
fn plural_variants<'a>(
    id: &str,
    rule: PluralRule,
    forms: &'a [String],
) -> Vec<(&'static str, &'a String)> {
    let categories = rule.cldr_categories();
    if forms.len() > categories.len() {
        tracing::warn!(
            id,
            forms = forms.len(),
            kept = categories.len(),
            "numerus forms beyond the language's plural categories are dropped"
        );
    }
    categories.iter().copied().zip(forms).collect()
}

/// Converts a template into Fluent pattern syntax.
///
/// Continuation lines are indented with `indent`. Characters Fluent would
/// treat as syntax are quoted as string literal placeables.
fn pattern(text: &str, indent: &str) -> String {
    let mut lines: Vec<String> = vec![String::new()];
    for segment in segments(text) {
        match segment {
            Segment::Literal(literal) => push_text(&mut lines, literal),
            Segment::Escape { text, .. } => push_text(&mut lines, text),
            Segment::Token { placeholder, .. } => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(&format!("{{ ${} }}", variable(&placeholder)));
                }
            }
        }
    }

    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
            out.push_str(indent);
        }
        let mut line = line.clone();
        let leading_special = index > 0 && line.starts_with(['[', '*', '.']);
        if line.is_empty() || line.starts_with(char::is_whitespace) || leading_special {
            line.insert_str(0, "{\"\"}");
        }
        if line.ends_with(char::is_whitespace) {
            line.push_str("{\"\"}");
        }
        out.push_str(&line);
    }
    out
}

fn push_text(lines: &mut Vec<String>, text: &str) {
    for (index, part) in text.split('\n').enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        let Some(line) = lines.last_mut() else {
            return;
        };
        for c in part.chars() {
            match c {
                '{' => line.push_str("{\"{\"}"),
                '}' => line.push_str("{\"}\"}"),
                '\r' => {}
                _ => line.push(c),
            }
        }
    }
}

/// Fluent variable name for a placeholder.
fn variable(placeholder: &Placeholder) -> String {
    match placeholder {
        Placeholder::Brace(name) => match name.parse::<usize>() {
            Ok(index) => format!("arg{}", index + 1),
            Err(_) => identifier(name),
        },
        Placeholder::Qt(n) => format!("arg{n}"),
        Placeholder::Numerus => "n".to_string(),
        Placeholder::Printf { position, .. } => format!("arg{}", position + 1),
        Placeholder::NamedPrintf { name, .. } => identifier(name),
    }
}

fn identifier(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if mapped.starts_with(|c: char| c.is_ascii_alphabetic()) {
        mapped
    } else {
        format!("v{mapped}")
    }
}
