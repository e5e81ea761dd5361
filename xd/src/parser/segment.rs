use std::ops::Range;

use crate::config::ParseOptions;
use crate::parser::clue;
use crate::parser::error::ParseError;

/// What a blank-line-delimited block of lines was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Meta,
    Grid,
    Clues,
    Notes,
}

/// One raw source line with its global position.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    /// One-based line number in the document.
    pub number: usize,
    /// Byte span in source for error reporting.
    pub span: Range<usize>,
}

/// A contiguous blank-line-delimited block of non-blank lines.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<Line>,
}

impl Section {
    /// Byte span covering the whole section.
    pub fn span(&self) -> Range<usize> {
        let start = self.lines.first().map_or(0, |line| line.span.start);
        let end = self.lines.last().map_or(0, |line| line.span.end);
        start..end
    }
}

/// Split the document on runs of blank lines and classify each section.
///
/// Classification is ordered: only the first section may be meta, anything
/// made of grid characters is the grid, anything opening with the clue
/// grammar is clues, and everything left falls through to notes. Exactly one grid
/// section must come out of this; zero or several is fatal.
pub fn segment(
    source: &str,
    file_id: usize,
    options: &ParseOptions,
) -> Result<Vec<Section>, ParseError> {
    let mut groups: Vec<Vec<Line>> = Vec::new();
    let mut current: Vec<Line> = Vec::new();
    let mut offset = 0usize;

    for (index, raw) in source.split('\n').enumerate() {
        let span = offset..offset + raw.len();
        offset = span.end + 1;
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        if text.trim().is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(Line {
                text: text.to_string(),
                number: index + 1,
                span,
            });
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    let sections: Vec<Section> = groups
        .into_iter()
        .enumerate()
        .map(|(index, lines)| Section {
            kind: classify(index, &lines, options),
            lines,
        })
        .collect();

    let mut grids = sections.iter().filter(|s| s.kind == SectionKind::Grid);
    let Some(_first) = grids.next() else {
        return Err(ParseError::structural(
            "no grid section found",
            0..source.len(),
            file_id,
        )
        .with_note("a grid section is lines of letters and block markers with no blank lines inside"));
    };
    if let Some(second) = grids.next() {
        return Err(ParseError::structural(
            "more than one grid section found",
            second.span(),
            file_id,
        ));
    }

    Ok(sections)
}

fn classify(index: usize, lines: &[Line], options: &ParseOptions) -> SectionKind {
    // Sections contain no blank lines by construction, so "every non-empty
    // line" is every line.
    if index == 0 && lines.iter().all(|line| looks_like_meta(&line.text)) {
        return SectionKind::Meta;
    }
    if lines.iter().all(|line| looks_like_grid_row(&line.text, options)) {
        return SectionKind::Grid;
    }
    // Clues classify off their opening line. A malformed line further down
    // must surface as a clue syntax error, not demote the section to notes
    // and silently drop its clues.
    if lines.first().is_some_and(|line| {
        clue::split_clue_line(&line.text).is_some()
            || clue::split_annotation_line(&line.text).is_some()
    }) {
        return SectionKind::Clues;
    }
    SectionKind::Notes
}

/// `key: value` with a non-empty key.
fn looks_like_meta(text: &str) -> bool {
    matches!(text.split_once(':'), Some((key, _)) if !key.trim().is_empty())
}

/// Only letters, block markers and open markers. Line lengths are the grid
/// builder's problem, so a ragged grid still classifies here and fails there
/// with the right error kind.
fn looks_like_grid_row(text: &str, options: &ParseOptions) -> bool {
    !text.is_empty()
        && text.chars().all(|ch| {
            ch == options.block_marker || ch == options.open_marker || ch.is_alphanumeric()
        })
}
