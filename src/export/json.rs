// SPDX-License-Identifier: MPL-2.0
//! JSON output of the runtime lookup table.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::catalog::{Catalog, Message};
use crate::error::Result;

/// Separator between context and source in flat keys (gettext's `EOT`).
pub const FLAT_KEY_SEPARATOR: char = '\u{4}';

/// Layout of the exported object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonShape {
    /// `{"context": {"source": translation}}`
    #[default]
    Nested,
    /// `{"context\u0004source": translation}`
    Flat,
}

/// Renders the servable translations of `catalog` as pretty-printed JSON.
///
/// Plain translations are strings, numerus translations arrays of forms.
/// Keys are sorted; for duplicates the first servable message wins.
pub fn to_json(catalog: &Catalog, shape: JsonShape) -> Result<String> {
    let value = match shape {
        JsonShape::Nested => {
            let mut contexts: BTreeMap<&str, BTreeMap<&str, Value>> = BTreeMap::new();
            for (context, message) in catalog.messages() {
                if let Some(value) = servable(message) {
                    contexts
                        .entry(context)
                        .or_default()
                        .entry(message.source.as_str())
                        .or_insert(value);
                }
            }
            serde_json::to_value(contexts)?
        }
        JsonShape::Flat => {
            let mut entries: BTreeMap<String, Value> = BTreeMap::new();
            for (context, message) in catalog.messages() {
                if let Some(value) = servable(message) {
                    entries
                        .entry(format!("{context}{FLAT_KEY_SEPARATOR}{}", message.source))
                        .or_insert(value);
                }
            }
            serde_json::to_value(entries)?
        }
    };
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn servable(message: &Message) -> Option<Value> {
    if let Some(text) = message.translation.servable_text() {
        return Some(Value::String(text.to_string()));
    }
    message
        .translation
        .servable_forms()
        .map(|forms| Value::Array(forms.iter().cloned().map(Value::String).collect()))
}
