use std::fmt;

use crate::clue::{ClueLabel, Direction};
use crate::config::ParseOptions;
use crate::parser::{self, ParseError, SectionKind};

/// Why a migration refused to produce a document.
#[derive(Debug)]
pub enum MigrationError {
    /// The document could not be parsed far enough to replay the grid.
    Parse(ParseError),
    /// A direction's clue count disagrees with the grid's word count, so
    /// sequential pairing would be a guess.
    CountMismatch {
        direction: Direction,
        clues: usize,
        words: usize,
    },
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationError::Parse(error) => error.fmt(f),
            MigrationError::CountMismatch {
                direction,
                clues,
                words,
            } => write!(
                f,
                "{} clue count {} does not match the grid's {} {} words",
                direction, clues, words, direction
            ),
        }
    }
}

impl std::error::Error for MigrationError {}

impl From<ParseError> for MigrationError {
    fn from(error: ParseError) -> Self {
        MigrationError::Parse(error)
    }
}

/// True when the document numbers its clues implicitly: it has clue lines
/// and none of them carries a stated grid position. Such a document needs
/// the grid replayed to know where any clue lives.
pub fn needs_explicit_headers(source: &str) -> bool {
    let mut saw_clue = false;
    for raw in source.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if parser::split_clue_line(line).is_some() {
            saw_clue = true;
        } else if let Some(annotation) = parser::split_annotation_line(line) {
            if annotation.key == "Start" {
                return false;
            }
        }
    }
    saw_clue
}

/// Rewrite an implicit-style document into explicit form: a `^Start:`
/// annotation is injected for every clue, computed from grid geometry via
/// the same word-start replay the linker uses.
///
/// Original lines are preserved byte-for-byte and in order; only annotation
/// lines are inserted. An already-explicit document comes back unchanged.
pub fn to_explicit_headers(source: &str) -> Result<String, MigrationError> {
    to_explicit_headers_with(source, &ParseOptions::default())
}

pub fn to_explicit_headers_with(
    source: &str,
    options: &ParseOptions,
) -> Result<String, MigrationError> {
    if !needs_explicit_headers(source) {
        return Ok(source.to_string());
    }

    let sections = parser::segment(source, 0, options)?;
    let Some(grid_section) = sections.iter().find(|s| s.kind == SectionKind::Grid) else {
        // segment() guarantees a grid section; guard the invariant anyway.
        return Err(ParseError::structural("no grid section found", 0..source.len(), 0).into());
    };
    let grid = parser::build_grid(grid_section, 0, options)?;
    let starts = grid.word_starts();

    // Each clue entry's label and the zero-based index of its last line
    // (the clue line or its final annotation), where the marker goes.
    let mut entries: Vec<(ClueLabel, usize)> = Vec::new();
    for section in sections.iter().filter(|s| s.kind == SectionKind::Clues) {
        for line in &section.lines {
            if let Some((label, _, _)) = parser::split_clue_line(&line.text) {
                entries.push((label, line.number - 1));
            } else if let Some(annotation) = parser::split_annotation_line(&line.text) {
                let Some(last) = entries.last_mut() else {
                    return Err(ParseError::clue_syntax(
                        format!("annotation for {} appears before any clue", annotation.label),
                        line.span.clone(),
                        0,
                    )
                    .into());
                };
                if last.0 != annotation.label {
                    return Err(ParseError::clue_syntax(
                        format!(
                            "annotation labelled {} follows clue {}",
                            annotation.label, last.0
                        ),
                        line.span.clone(),
                        0,
                    )
                    .into());
                }
                last.1 = line.number - 1;
            } else {
                return Err(ParseError::clue_syntax(
                    format!("cannot parse clue line: {}", line.text),
                    line.span.clone(),
                    0,
                )
                .into());
            }
        }
    }

    // Pair clues with replayed word starts per direction, by source order.
    // Counts must match exactly; anything else would be a guessed pairing.
    let mut insertions: Vec<(usize, String)> = Vec::new();
    for direction in [Direction::Across, Direction::Down] {
        let labelled: Vec<&(ClueLabel, usize)> = entries
            .iter()
            .filter(|(label, _)| label.direction == direction)
            .collect();
        let words: Vec<_> = starts
            .iter()
            .filter(|start| start.direction == direction)
            .collect();
        if labelled.len() != words.len() {
            return Err(MigrationError::CountMismatch {
                direction,
                clues: labelled.len(),
                words: words.len(),
            });
        }
        for ((label, after), word) in labelled.into_iter().zip(words) {
            insertions.push((
                *after,
                format!("{} ^Start: {}", label, word.position),
            ));
        }
    }
    insertions.sort_by_key(|(after, _)| *after);

    // Splice, leaving every original line untouched.
    let mut out: Vec<String> = Vec::new();
    let mut pending = insertions.into_iter().peekable();
    for (index, raw) in source.split('\n').enumerate() {
        out.push(raw.to_string());
        while pending.peek().is_some_and(|(after, _)| *after == index) {
            if let Some((_, marker)) = pending.next() {
                out.push(marker);
            }
        }
    }
    Ok(out.join("\n"))
}
