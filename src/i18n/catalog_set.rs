// SPDX-License-Identifier: MPL-2.0
//! All catalogs of an application, one per locale.

use std::fs;
use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

use super::locale::{locale_from_file_stem, parse_locale, same_language};
use crate::domain::catalog::Catalog;
use crate::error::{Error, Result};
use crate::ts;

/// A catalog together with the locale it serves.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub locale: LanguageIdentifier,
    /// File the catalog was read from, if any.
    pub path: Option<PathBuf>,
    pub catalog: Catalog,
}

/// Locale-indexed collection of catalogs.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: Vec<LoadedCatalog>,
    load_errors: Vec<(PathBuf, Error)>,
}

impl CatalogSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.ts` file of `dir`, in file name order.
    ///
    /// Files that cannot be read or parsed are skipped and recorded in
    /// [`load_errors`](Self::load_errors); only failing to list `dir` is an error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Ok(Self::load_files(&catalog_files(dir.as_ref())?))
    }

    /// Loads the given files, skipping (and recording) the ones that fail.
    #[must_use]
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut set = Self::new();
        for path in paths {
            let path = path.as_ref();
            match Self::load_file(path) {
                Ok(loaded) => set.push(loaded),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping catalog");
                    set.load_errors.push((path.to_path_buf(), err));
                }
            }
        }
        tracing::info!(
            catalogs = set.catalogs.len(),
            failed = set.load_errors.len(),
            "loaded catalogs"
        );
        set
    }

    /// Parses one file and determines its locale.
    pub fn load_file(path: &Path) -> Result<LoadedCatalog> {
        let catalog = ts::parse_file(path)?;
        let locale = locale_of(path, &catalog).ok_or_else(|| {
            Error::Locale(format!("cannot determine locale of {}", path.display()))
        })?;
        Ok(LoadedCatalog {
            locale,
            path: Some(path.to_path_buf()),
            catalog,
        })
    }

    /// Adds a catalog, replacing one with the same locale.
    pub fn insert(&mut self, locale: LanguageIdentifier, catalog: Catalog) {
        self.push(LoadedCatalog {
            locale,
            path: None,
            catalog,
        });
    }

    fn push(&mut self, loaded: LoadedCatalog) {
        if let Some(existing) = self.catalogs.iter_mut().find(|c| c.locale == loaded.locale) {
            tracing::warn!(locale = %loaded.locale, "replacing catalog with the same locale");
            *existing = loaded;
        } else {
            self.catalogs.push(loaded);
        }
    }

    /// Catalog for exactly this locale.
    #[must_use]
    pub fn get(&self, locale: &LanguageIdentifier) -> Option<&Catalog> {
        self.catalogs
            .iter()
            .find(|c| &c.locale == locale)
            .map(|c| &c.catalog)
    }

    /// Exact match, else the first catalog of the same language.
    #[must_use]
    pub fn best_match(&self, locale: &LanguageIdentifier) -> Option<&LoadedCatalog> {
        self.catalogs
            .iter()
            .find(|c| &c.locale == locale)
            .or_else(|| self.catalogs.iter().find(|c| same_language(&c.locale, locale)))
    }

    #[must_use]
    pub fn locales(&self) -> Vec<&LanguageIdentifier> {
        self.catalogs.iter().map(|c| &c.locale).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedCatalog> {
        self.catalogs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Files skipped by the last load, with the reason.
    #[must_use]
    pub fn load_errors(&self) -> &[(PathBuf, Error)] {
        &self.load_errors
    }
}

/// The `*.ts` files of `dir` (any case of the extension), sorted by name.
pub fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(ts::TS_EXTENSION))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Locale of a catalog: the `language` attribute, else the file stem.
fn locale_of(path: &Path, catalog: &Catalog) -> Option<LanguageIdentifier> {
    catalog
        .language
        .as_deref()
        .and_then(parse_locale)
        .or_else(|| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(locale_from_file_stem)
        })
}
