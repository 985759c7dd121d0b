// SPDX-License-Identifier: MPL-2.0
//! TS serialization in the layout `lupdate` produces.
//!
//! Indentation is written by hand (four spaces per level, contexts flush
//! left) so that no whitespace is ever injected inside text elements.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::catalog::{Catalog, Context, Message, TranslationBody};
use crate::error::Result;

type TsWriter = Writer<Vec<u8>>;

/// Serializes `catalog` as a TS document.
pub fn to_string(catalog: &Catalog) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    newline(&mut writer, 0)?;
    writer.write_event(Event::DocType(BytesText::from_escaped("TS")))?;
    newline(&mut writer, 0)?;

    let mut root = BytesStart::new("TS");
    root.push_attribute(("version", catalog.version.as_str()));
    if let Some(language) = &catalog.language {
        root.push_attribute(("language", language.as_str()));
    }
    if let Some(source_language) = &catalog.source_language {
        root.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    for context in &catalog.contexts {
        write_context(&mut writer, context)?;
    }

    newline(&mut writer, 0)?;
    writer.write_event(Event::End(BytesEnd::new("TS")))?;
    newline(&mut writer, 0)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_context(writer: &mut TsWriter, context: &Context) -> Result<()> {
    newline(writer, 0)?;
    writer.write_event(Event::Start(BytesStart::new("context")))?;
    newline(writer, 1)?;
    text_element(writer, "name", &context.name)?;
    if let Some(comment) = &context.comment {
        newline(writer, 1)?;
        text_element(writer, "comment", comment)?;
    }
    for message in &context.messages {
        write_message(writer, message)?;
    }
    newline(writer, 0)?;
    writer.write_event(Event::End(BytesEnd::new("context")))?;
    Ok(())
}

fn write_message(writer: &mut TsWriter, message: &Message) -> Result<()> {
    newline(writer, 1)?;
    let mut start = BytesStart::new("message");
    if let Some(id) = &message.id {
        start.push_attribute(("id", id.as_str()));
    }
    if message.is_numerus() {
        start.push_attribute(("numerus", "yes"));
    }
    writer.write_event(Event::Start(start))?;

    for location in &message.locations {
        newline(writer, 2)?;
        let mut element = BytesStart::new("location");
        element.push_attribute(("filename", location.filename.as_str()));
        if let Some(line) = &location.line {
            element.push_attribute(("line", line.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }

    newline(writer, 2)?;
    text_element(writer, "source", &message.source)?;

    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            newline(writer, 2)?;
            text_element(writer, name, value)?;
        }
    }

    newline(writer, 2)?;
    let mut translation = BytesStart::new("translation");
    if let Some(kind) = message.translation.kind.as_attribute() {
        translation.push_attribute(("type", kind));
    }
    writer.write_event(Event::Start(translation))?;
    match &message.translation.body {
        TranslationBody::Text(text) => write_text(writer, text)?,
        TranslationBody::Numerus(forms) => {
            for form in forms {
                newline(writer, 3)?;
                text_element(writer, "numerusform", form)?;
            }
            if !forms.is_empty() {
                newline(writer, 2)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new("translation")))?;

    for (key, value) in &message.extras {
        newline(writer, 2)?;
        text_element(writer, &format!("extra-{key}"), value)?;
    }

    newline(writer, 1)?;
    writer.write_event(Event::End(BytesEnd::new("message")))?;
    Ok(())
}

fn newline(writer: &mut TsWriter, level: usize) -> Result<()> {
    let indent = format!("\n{}", "    ".repeat(level));
    writer.write_event(Event::Text(BytesText::from_escaped(indent)))?;
    Ok(())
}

fn text_element(writer: &mut TsWriter, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    write_text(writer, text)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Characters XML 1.0 cannot carry; Qt writes them as `<byte>` elements.
fn needs_byte_escape(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{fffe}' | '\u{ffff}')
}

fn write_text(writer: &mut TsWriter, text: &str) -> Result<()> {
    let mut rest = text;
    while let Some(index) = rest.find(needs_byte_escape) {
        let (plain, tail) = rest.split_at(index);
        if !plain.is_empty() {
            writer.write_event(Event::Text(BytesText::new(plain)))?;
        }
        let mut chars = tail.chars();
        if let Some(c) = chars.next() {
            let mut byte = BytesStart::new("byte");
            let value = format!("x{:x}", u32::from(c));
            byte.push_attribute(("value", value.as_str()));
            writer.write_event(Event::Empty(byte))?;
        }
        rest = chars.as_str();
    }
    if !rest.is_empty() {
        writer.write_event(Event::Text(BytesText::new(rest)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Location, Translation, TranslationKind};
    use crate::ts::parse_str;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new(Some("da".into()));
        let context = catalog.context_mut_or_insert("AcfLogReader");
        let mut ready = Message::new("Ready", Translation::finished("Klar"));
        ready
            .locations
            .push(Location::new("../app/views/acf_log_reader.py", Some(69)));
        context.messages.push(ready);
        context
            .messages
            .push(Message::new("Tom & \"Jerry\"", Translation::unfinished()));
        catalog
    }

    #[test]
    fn writes_lupdate_layout() {
        let xml = to_string(&sample()).expect("serialize");
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="da">
<context>
    <name>AcfLogReader</name>
    <message>
        <location filename="../app/views/acf_log_reader.py" line="69"/>
        <source>Ready</source>
        <translation>Klar</translation>
    </message>
    <message>
        <source>Tom &amp; &quot;Jerry&quot;</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn output_parses_back_to_the_same_catalog() {
        let catalog = sample();
        let reparsed = parse_str(&to_string(&catalog).expect("serialize")).expect("parse");
        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn numerus_and_control_characters_survive() {
        let mut catalog = Catalog::new(Some("pl".into()));
        let context = catalog.context_mut_or_insert("Files");
        let mut message = Message::new(
            "%n file(s)",
            Translation::numerus(
                TranslationKind::Finished,
                vec!["%n plik".into(), "%n pliki".into(), "%n plików".into()],
            ),
        );
        message.extra_comment = Some("bell\u{7}".into());
        context.messages.push(message);

        let xml = to_string(&catalog).expect("serialize");
        assert!(xml.contains(r#"<message numerus="yes">"#));
        assert!(xml.contains(r#"bell<byte value="x7"/>"#));
        assert_eq!(parse_str(&xml).expect("parse"), catalog);
    }
}
