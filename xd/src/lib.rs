pub mod clue;
pub mod config;
pub mod grid;
pub mod link;
pub mod lint;
pub mod migrate;
pub mod parser;
pub mod report;

use std::fmt;

use serde::ser::Serializer;
use serde::Serialize;

use crate::clue::ClueSet;
use crate::grid::Grid;
use crate::report::Report;

/// A parsed xd crossword document with its validation/lint report.
#[derive(Debug, Clone, Serialize)]
pub struct Crossword {
    /// Header metadata in source order (Title, Author, ...).
    #[serde(serialize_with = "meta_as_map")]
    pub meta: Vec<(String, String)>,
    /// The tile matrix.
    #[serde(rename = "tiles")]
    pub grid: Grid,
    pub clues: ClueSet,
    /// Free-text notes sections, in source order.
    pub notes: Vec<String>,
    pub report: Report,
    /// The source file ID (for error reporting with codespan-reporting).
    #[serde(skip)]
    pub source_id: usize,
}

impl Crossword {
    /// Look up a meta value by key, case-insensitively.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Crossword {
    /// Re-emits the document as xd text: meta, grid, clue lists with their
    /// annotations, then notes, blank-line separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.meta {
            writeln!(f, "{}: {}", key, value)?;
        }
        if !self.meta.is_empty() {
            writeln!(f)?;
        }
        write!(f, "{}", self.grid)?;
        for list in [&self.clues.across, &self.clues.down] {
            if list.is_empty() {
                continue;
            }
            writeln!(f)?;
            for clue in list {
                write!(f, "{}", clue)?;
            }
        }
        for notes in &self.notes {
            writeln!(f)?;
            writeln!(f, "{}", notes)?;
        }
        Ok(())
    }
}

/// Serialize ordered meta pairs as a JSON map, preserving source order.
fn meta_as_map<S>(meta: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(meta.iter().map(|(key, value)| (key, value)))
}
