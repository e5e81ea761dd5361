use std::ops::Range;

use serde::Serialize;

use crate::clue::Clue;

/// How bad a finding is. Errors flip the report to failure; warnings don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Where in the document a finding points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// One-based source line.
    pub line: usize,
    /// The clue the finding is about, e.g. "A1", if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
}

/// A single validation or lint finding.
///
/// Unlike [`crate::parser::ParseError`], these never abort the parse; they
/// accumulate into the [`Report`] so callers can show a best-effort model
/// alongside its problems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Byte span in source, when known. Display-only.
    #[serde(skip)]
    pub span: Option<Range<usize>>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            location: None,
            span: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            location: None,
            span: None,
        }
    }

    /// Attach the source location of the clue this finding is about.
    pub fn about_clue(mut self, clue: &Clue) -> Self {
        self.location = Some(Location {
            line: clue.line,
            clue: Some(clue.label.to_string()),
        });
        self.span = Some(clue.span.clone());
        self
    }
}

/// Aggregated outcome of validation and linting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub success: bool,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Report {
    /// Split accumulated findings by severity, preserving their order.
    /// Callers append validator errors before lint findings, so errors stay
    /// ahead of same-source warnings without further sorting.
    pub fn assemble(diagnostics: Vec<Diagnostic>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .into_iter()
            .partition(|d| d.severity == Severity::Error);
        Report {
            success: errors.is_empty(),
            warnings,
            errors,
        }
    }
}
