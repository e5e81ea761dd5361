use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// Which structural contract a fatal parse failure violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Section discovery failed: no grid section, or more than one.
    Structural,
    /// The grid section is malformed (ragged rows).
    Grid,
    /// A clues-section line matches neither the clue grammar nor the
    /// annotation grammar.
    ClueSyntax,
}

impl ParseErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ParseErrorKind::Structural => "structural error",
            ParseErrorKind::Grid => "grid error",
            ParseErrorKind::ClueSyntax => "clue syntax error",
        }
    }
}

/// A fatal parse failure with source location information.
///
/// These abort the whole parse. Grid/answer disagreements and lint findings
/// are not fatal; they go to [`crate::report::Report`] instead.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn structural(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError::new(ParseErrorKind::Structural, message, span, file_id)
    }

    pub fn grid(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError::new(ParseErrorKind::Grid, message, span, file_id)
    }

    pub fn clue_syntax(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError::new(ParseErrorKind::ClueSyntax, message, span, file_id)
    }

    fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        span: Range<usize>,
        file_id: usize,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for ParseError {}
