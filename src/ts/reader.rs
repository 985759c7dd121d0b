// SPDX-License-Identifier: MPL-2.0
//! Streaming TS reader built on `quick-xml` events.
//!
//! Text content is kept byte-for-byte: no trimming, entities and CDATA are
//! decoded, and Qt's `<byte value="x1b"/>` escapes for control characters
//! are turned back into the characters they encode.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::domain::catalog::{
    Catalog, Context, Location, Message, Translation, TranslationBody, TranslationKind,
};
use crate::error::{ParseError, ParseErrorKind, Result};

/// Parses a TS document.
pub fn parse_str(input: &str) -> Result<Catalog> {
    let mut reader = Reader::from_str(input);
    let mut state = ReaderState::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|err| fail(reader.error_position() as u64, malformed(err)))?;
        match event {
            Event::Start(e) => state.start(&e, position)?,
            Event::Empty(e) => {
                state.start(&e, position)?;
                let name = element_name(&e);
                state.end(&name, position)?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                state.end(&name, position)?;
            }
            Event::Text(e) => {
                if state.capturing() {
                    let text = e.unescape().map_err(|err| fail(position, malformed(err)))?;
                    state.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if state.capturing() {
                    let text = String::from_utf8(e.into_inner().into_owned())?;
                    state.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let position = reader.buffer_position() as u64;
    state.finish(position)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Decodes the `value` of a `<byte>` element: `x1b` is hex, `27` decimal.
fn decode_byte(value: &str) -> Option<char> {
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn malformed(err: impl std::fmt::Display) -> ParseErrorKind {
    ParseErrorKind::Malformed(err.to_string())
}

fn fail(position: u64, kind: ParseErrorKind) -> crate::error::Error {
    ParseError { position, kind }.into()
}

#[derive(Default)]
struct ReaderState {
    catalog: Option<Catalog>,
    finished: bool,
    stack: Vec<String>,
    /// Depth inside an element whose content is ignored.
    skip_depth: usize,
    context: Option<Context>,
    context_has_name: bool,
    message: Option<Message>,
    message_has_source: bool,
    numerus: bool,
    kind: TranslationKind,
    forms: Vec<String>,
    capture: bool,
    text: String,
}

impl ReaderState {
    fn capturing(&self) -> bool {
        self.capture && self.skip_depth == 0
    }

    fn begin_capture(&mut self) {
        self.capture = true;
        self.text.clear();
    }

    fn take_text(&mut self) -> String {
        self.capture = false;
        std::mem::take(&mut self.text)
    }

    fn start(&mut self, e: &BytesStart<'_>, position: u64) -> Result<()> {
        let name = element_name(e);
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            self.stack.push(name);
            return Ok(());
        }
        let parent = self.stack.last().cloned().unwrap_or_default();

        match (parent.as_str(), name.as_str()) {
            ("", "TS") => {
                let mut catalog = Catalog::new(attribute(e, b"language")?);
                if let Some(version) = attribute(e, b"version")? {
                    catalog.version = version;
                }
                catalog.source_language = attribute(e, b"sourcelanguage")?;
                self.catalog = Some(catalog);
            }
            ("", other) => return Err(fail(position, ParseErrorKind::NotTsDocument(other.into()))),
            ("TS", "context") => {
                self.context = Some(Context::default());
                self.context_has_name = false;
            }
            ("TS", "defaultcodec" | "dependencies") => self.skip_depth = 1,
            ("context", "name" | "comment") => self.begin_capture(),
            ("context", "message") => {
                let mut message = Message {
                    id: attribute(e, b"id")?,
                    ..Message::default()
                };
                self.numerus = attribute(e, b"numerus")?.as_deref() == Some("yes");
                if self.numerus {
                    message.translation.body = TranslationBody::Numerus(Vec::new());
                }
                self.message = Some(message);
                self.message_has_source = false;
            }
            ("message", "location") => {
                let filename = attribute(e, b"filename")?
                    .ok_or_else(|| fail(position, ParseErrorKind::MissingLocationFilename))?;
                let line = attribute(e, b"line")?;
                if let Some(message) = self.message.as_mut() {
                    message.locations.push(Location { filename, line });
                }
            }
            ("message", "source" | "oldsource" | "comment" | "oldcomment" | "extracomment")
            | ("message", "translatorcomment") => self.begin_capture(),
            ("message", extra) if extra.starts_with("extra-") => self.begin_capture(),
            ("message", "userdata") => self.skip_depth = 1,
            ("message", "translation") => {
                let raw_kind = attribute(e, b"type")?.unwrap_or_default();
                self.kind = TranslationKind::from_attribute(&raw_kind)
                    .ok_or_else(|| fail(position, ParseErrorKind::UnknownTranslationType(raw_kind)))?;
                self.forms.clear();
                self.begin_capture();
            }
            ("translation", "numerusform") if self.numerus => self.begin_capture(),
            (_, "byte") if self.capturing() => {
                let decoded = attribute(e, b"value")?.as_deref().and_then(decode_byte);
                if let Some(c) = decoded {
                    self.text.push(c);
                }
            }
            (parent, element) => {
                return Err(fail(
                    position,
                    ParseErrorKind::UnexpectedElement {
                        element: element.into(),
                        parent: parent.into(),
                    },
                ))
            }
        }
        self.stack.push(name);
        Ok(())
    }

    fn end(&mut self, name: &str, position: u64) -> Result<()> {
        self.stack.pop();
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        let parent = self.stack.last().cloned().unwrap_or_default();

        match (parent.as_str(), name) {
            ("", "TS") => self.finished = true,
            ("TS", "context") => {
                let context = self.context.take().unwrap_or_default();
                if !self.context_has_name {
                    return Err(fail(position, ParseErrorKind::MissingContextName));
                }
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.contexts.push(context);
                }
            }
            ("context", "name") => {
                let text = self.take_text();
                if let Some(context) = self.context.as_mut() {
                    context.name = text;
                    self.context_has_name = true;
                }
            }
            ("context", "comment") => {
                let text = self.take_text();
                if let Some(context) = self.context.as_mut() {
                    context.comment = Some(text);
                }
            }
            ("context", "message") => {
                let message = self.message.take().unwrap_or_default();
                if !self.message_has_source {
                    return Err(fail(position, ParseErrorKind::MissingSource));
                }
                if let Some(context) = self.context.as_mut() {
                    context.messages.push(message);
                }
            }
            ("message", "translation") => {
                let text = self.take_text();
                let body = if self.numerus {
                    TranslationBody::Numerus(std::mem::take(&mut self.forms))
                } else {
                    TranslationBody::Text(text)
                };
                if let Some(message) = self.message.as_mut() {
                    message.translation = Translation {
                        kind: self.kind,
                        body,
                    };
                }
            }
            ("translation", "numerusform") => {
                let text = std::mem::take(&mut self.text);
                self.forms.push(text);
            }
            ("message", field) => {
                if field == "location" {
                    return Ok(());
                }
                let text = self.take_text();
                let Some(message) = self.message.as_mut() else {
                    return Ok(());
                };
                match field {
                    "source" => {
                        message.source = text;
                        self.message_has_source = true;
                    }
                    "oldsource" => message.old_source = Some(text),
                    "comment" => message.comment = Some(text),
                    "oldcomment" => message.old_comment = Some(text),
                    "extracomment" => message.extra_comment = Some(text),
                    "translatorcomment" => message.translator_comment = Some(text),
                    extra => {
                        let key = extra.trim_start_matches("extra-").to_string();
                        message.extras.push((key, text));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self, position: u64) -> Result<Catalog> {
        match self.catalog {
            Some(catalog) if self.finished => Ok(catalog),
            _ => Err(fail(position, ParseErrorKind::UnexpectedEof)),
        }
    }
}
