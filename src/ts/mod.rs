// SPDX-License-Identifier: MPL-2.0
//! Qt Linguist TS (`version="2.1"`) reading and writing.
//!
//! # Format
//!
//! ```text
//! <TS version="2.1" language="da">
//!   <context>
//!     <name>AcfLogReader</name>
//!     <message>
//!       <location filename="..." line="69"/>
//!       <source>Ready</source>
//!       <translation>Klar</translation>
//!     </message>
//!   </context>
//! </TS>
//! ```

mod reader;
mod writer;

pub use reader::parse_str;
pub use writer::to_string;

use crate::domain::catalog::Catalog;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// File extension of TS catalogs.
pub const TS_EXTENSION: &str = "ts";

/// Reads and parses a TS file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let catalog = parse_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        contexts = catalog.contexts.len(),
        "parsed TS catalog"
    );
    Ok(catalog)
}

/// Serializes `catalog` to `path`, creating parent directories.
pub fn write_file<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_string(catalog)?)?;
    Ok(())
}
