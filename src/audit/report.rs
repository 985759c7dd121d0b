// SPDX-License-Identifier: MPL-2.0
//! Audit findings and their JSON / text rendering.

use std::fmt;

use serde::Serialize;

use crate::error::Result;

// =============================================================================
// Severity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Finding Kind
// =============================================================================

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The file could not be read, parsed, or assigned a locale.
    Unreadable,
    /// Translation tokens differ from the source tokens.
    PlaceholderMismatch,
    /// The same source and comment appear twice in one context.
    DuplicateSource,
    /// Empty `<translation>` that is not marked unfinished.
    EmptyFinished,
    /// Numerus form count differs from the language's plural rule.
    NumerusFormCount,
    /// Context absent from the reference catalog.
    ContextNotInReference,
    /// Reference context absent from this catalog.
    ContextMissing,
}

impl FindingKind {
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            FindingKind::Unreadable | FindingKind::PlaceholderMismatch => Severity::Error,
            _ => Severity::Warning,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::Unreadable => "unreadable",
            FindingKind::PlaceholderMismatch => "placeholder-mismatch",
            FindingKind::DuplicateSource => "duplicate-source",
            FindingKind::EmptyFinished => "empty-finished",
            FindingKind::NumerusFormCount => "numerus-form-count",
            FindingKind::ContextNotInReference => "context-not-in-reference",
            FindingKind::ContextMissing => "context-missing",
        }
    }
}

// =============================================================================
// Finding
// =============================================================================

/// One problem in one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// File path or locale of the catalog.
    pub catalog: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub detail: String,
}

impl Finding {
    #[must_use]
    pub fn new(kind: FindingKind, catalog: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            catalog: catalog.into(),
            context: None,
            source: None,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn for_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.catalog, self.severity, self.kind.as_str())?;
        if let Some(context) = &self.context {
            write!(f, " {context}")?;
        }
        if let Some(source) = &self.source {
            write!(f, " {source:?}")?;
        }
        write!(f, ": {}", self.detail)
    }
}

// =============================================================================
// Report
// =============================================================================

/// Findings of one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    /// Number of catalogs examined, including unreadable ones.
    pub catalogs: usize,
    pub findings: Vec<Finding>,
    #[serde(skip)]
    pub treat_warnings_as_errors: bool,
}

impl Report {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Whether the run should fail. Warnings count when
    /// `treat_warnings_as_errors` is set.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        if self.treat_warnings_as_errors {
            !self.findings.is_empty()
        } else {
            self.error_count() > 0
        }
    }

    /// Findings of one kind.
    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per finding, then a summary line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            out.push_str(&finding.to_string());
            out.push('\n');
        }
        out.push_str(&format!(
            "{} catalog(s) checked: {} error(s), {} warning(s)\n",
            self.catalogs,
            self.error_count(),
            self.warning_count()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning() -> Finding {
        Finding::new(FindingKind::EmptyFinished, "da.ts", "empty translation")
            .in_context("BaseModsPanel")
            .for_source("Do nothing and exit")
    }

    #[test]
    fn severity_follows_kind() {
        assert_eq!(FindingKind::PlaceholderMismatch.severity(), Severity::Error);
        assert_eq!(FindingKind::DuplicateSource.severity(), Severity::Warning);
        assert_eq!(warning().severity, Severity::Warning);
    }

    #[test]
    fn warnings_fail_only_when_promoted() {
        let mut report = Report {
            catalogs: 1,
            ..Report::default()
        };
        report.push(warning());
        assert!(!report.has_errors());

        report.treat_warnings_as_errors = true;
        assert!(report.has_errors());
    }

    #[test]
    fn errors_always_fail() {
        let mut report = Report::default();
        report.push(Finding::new(FindingKind::PlaceholderMismatch, "da.ts", "missing {count}"));
        assert!(report.has_errors());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn text_rendering_lists_findings_and_summary() {
        let mut report = Report {
            catalogs: 2,
            ..Report::default()
        };
        report.push(warning());
        let text = report.render_text();
        assert!(text.starts_with(
            "da.ts: warning [empty-finished] BaseModsPanel \"Do nothing and exit\": empty translation\n"
        ));
        assert!(text.ends_with("2 catalog(s) checked: 0 error(s), 1 warning(s)\n"));
    }

    #[test]
    fn json_uses_snake_case_and_skips_absent_fields() {
        let mut report = Report::default();
        report.push(Finding::new(FindingKind::ContextMissing, "fr_FR.ts", "missing AboutDialog"));
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("json")).expect("valid json");

        let finding = &value["findings"][0];
        assert_eq!(finding["kind"], "context_missing");
        assert_eq!(finding["severity"], "warning");
        assert!(finding.get("source").is_none());
        assert!(value.get("treat_warnings_as_errors").is_none());
    }
}
