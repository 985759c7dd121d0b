// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Xml(String),
    Parse(ParseError),
    Config(String),
    Export(String),
    Locale(String),
    Usage(String),
}

/// A structural problem found while reading a TS document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Byte offset in the input where the problem was detected.
    pub position: u64,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The root element is not `<TS>`.
    NotTsDocument(String),

    /// An element appeared where the TS schema does not allow it.
    UnexpectedElement { element: String, parent: String },

    /// A `<context>` closed without a `<name>`.
    MissingContextName,

    /// A `<message>` closed without a `<source>`.
    MissingSource,

    /// `<translation type="...">` carried a value outside the TS schema.
    UnknownTranslationType(String),

    /// `<location>` without a `filename` attribute.
    MissingLocationFilename,

    /// The document ended in the middle of an element.
    UnexpectedEof,

    /// Not well-formed XML: mismatched tags, bad entities, broken attributes.
    Malformed(String),
}

impl ParseErrorKind {
    /// Returns the message key used when reporting this error to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            ParseErrorKind::NotTsDocument(_) => "error-parse-not-ts",
            ParseErrorKind::UnexpectedElement { .. } => "error-parse-unexpected-element",
            ParseErrorKind::MissingContextName => "error-parse-missing-context-name",
            ParseErrorKind::MissingSource => "error-parse-missing-source",
            ParseErrorKind::UnknownTranslationType(_) => "error-parse-unknown-translation-type",
            ParseErrorKind::MissingLocationFilename => "error-parse-missing-location-filename",
            ParseErrorKind::UnexpectedEof => "error-parse-unexpected-eof",
            ParseErrorKind::Malformed(_) => "error-parse-malformed",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::NotTsDocument(root) => {
                write!(f, "root element is <{}>, expected <TS>", root)
            }
            ParseErrorKind::UnexpectedElement { element, parent } => {
                write!(f, "unexpected <{}> inside <{}>", element, parent)
            }
            ParseErrorKind::MissingContextName => write!(f, "<context> without <name>"),
            ParseErrorKind::MissingSource => write!(f, "<message> without <source>"),
            ParseErrorKind::UnknownTranslationType(value) => {
                write!(f, "unknown translation type \"{}\"", value)
            }
            ParseErrorKind::MissingLocationFilename => {
                write!(f, "<location> without filename attribute")
            }
            ParseErrorKind::UnexpectedEof => write!(f, "unexpected end of document"),
            ParseErrorKind::Malformed(reason) => write!(f, "malformed XML: {}", reason),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.kind, self.position)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Xml(e) => write!(f, "XML Error: {}", e),
            Error::Parse(e) => write!(f, "Parse Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
            Error::Locale(e) => write!(f, "Locale Error: {}", e),
            Error::Usage(e) => write!(f, "Usage Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
