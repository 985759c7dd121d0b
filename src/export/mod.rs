// SPDX-License-Identifier: MPL-2.0
//! Conversion of catalogs to other localization formats.
//!
//! - [`po`]: gettext PO, including unfinished and vanished entries
//! - [`json`]: runtime lookup table as nested or flat JSON
//! - [`fluent`]: Fluent resource with placeholders mapped to variables

pub mod fluent;
pub mod json;
pub mod po;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::domain::catalog::Catalog;
use crate::error::{Error, Result};

pub use json::JsonShape;

/// Output format of [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Po,
    Json,
    JsonFlat,
    Fluent,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Po => "po",
            ExportFormat::Json | ExportFormat::JsonFlat => "json",
            ExportFormat::Fluent => "ftl",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "po" => Ok(ExportFormat::Po),
            "json" => Ok(ExportFormat::Json),
            "json-flat" => Ok(ExportFormat::JsonFlat),
            "ftl" | "fluent" => Ok(ExportFormat::Fluent),
            other => Err(Error::Usage(format!(
                "unknown export format '{other}' (expected po, json, json-flat or ftl)"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Po => "po",
            ExportFormat::Json => "json",
            ExportFormat::JsonFlat => "json-flat",
            ExportFormat::Fluent => "ftl",
        };
        write!(f, "{name}")
    }
}

/// Renders `catalog` in `format`.
pub fn export(catalog: &Catalog, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Po => Ok(po::to_po(catalog)),
        ExportFormat::Json => json::to_json(catalog, JsonShape::Nested),
        ExportFormat::JsonFlat => json::to_json(catalog, JsonShape::Flat),
        ExportFormat::Fluent => fluent::to_ftl(catalog),
    }
}

/// Writes content to a file atomically.
///
/// Uses a temporary file next to the target, then renames it to the final
/// path so that a failed write never leaves a truncated file behind.
///
/// # Errors
///
/// Returns an error if writing or renaming fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn format_names_parse() {
        assert_eq!("po".parse::<ExportFormat>(), Ok(ExportFormat::Po));
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("json-flat".parse::<ExportFormat>(), Ok(ExportFormat::JsonFlat));
        assert_eq!("fluent".parse::<ExportFormat>(), Ok(ExportFormat::Fluent));
        assert!(matches!("xliff".parse::<ExportFormat>(), Err(Error::Usage(_))));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for format in [
            ExportFormat::Po,
            ExportFormat::Json,
            ExportFormat::JsonFlat,
            ExportFormat::Fluent,
        ] {
            assert_eq!(format.to_string().parse::<ExportFormat>(), Ok(format));
        }
    }

    #[test]
    fn atomic_write_creates_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("da.po");
        write_atomic(&path, "msgid \"\"\n").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "msgid \"\"\n");
    }

    #[test]
    fn atomic_write_no_temp_file_on_success() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("da.json");
        write_atomic(&path, "{}").expect("write");
        assert!(!dir.path().join("da.json.tmp").exists());
    }
}
