use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::grid::Position;

/// Reading direction of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The letter used in clue labels: `A` or `D`.
    pub fn letter(self) -> char {
        match self {
            Direction::Across => 'A',
            Direction::Down => 'D',
        }
    }

    pub fn from_letter(ch: char) -> Option<Direction> {
        match ch {
            'A' | 'a' => Some(Direction::Across),
            'D' | 'd' => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A clue's printed identity: direction plus number, e.g. `A12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClueLabel {
    pub direction: Direction,
    pub number: u32,
}

impl fmt::Display for ClueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.letter(), self.number)
    }
}

/// One entry from a clues section.
///
/// `position` and `length` are filled in during linking; everything else
/// comes straight from the source text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub label: ClueLabel,
    pub question: String,
    /// The authored answer, split characters included.
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// The configured split character, recorded when the answer embeds it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_character: Option<char>,
    /// Position stated in the source via a `^Start:` annotation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_start: Option<Position>,
    /// Grid position resolved during linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Word length derived from grid geometry during linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// One-based source line of the clue line, for diagnostics.
    #[serde(skip)]
    pub line: usize,
    /// Byte span of the clue line for error reporting.
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Clue {
    /// Answer letters as validated against the grid: the split character
    /// removed, everything else untouched.
    pub fn letters(&self, split: char) -> String {
        self.answer.chars().filter(|&ch| ch != split).collect()
    }
}

impl fmt::Display for Clue {
    /// Re-emits the clue entry in xd form: the clue line followed by its
    /// annotation lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {} ~ {}", self.label, self.question, self.answer)?;
        if let Some(hint) = &self.hint {
            writeln!(f, "{} ^Hint: {}", self.label, hint)?;
        }
        if let Some(start) = self.explicit_start {
            writeln!(f, "{} ^Start: {},{}", self.label, start.row, start.col)?;
        }
        Ok(())
    }
}

/// The across and down clue lists, each in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClueSet {
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

impl ClueSet {
    /// Append a clue to the list its label names.
    pub fn push(&mut self, clue: Clue) {
        match clue.label.direction {
            Direction::Across => self.across.push(clue),
            Direction::Down => self.down.push(clue),
        }
    }

    pub fn list(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    pub fn list_mut(&mut self, direction: Direction) -> &mut Vec<Clue> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }

    /// All clues, across first, both lists in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Clue> {
        self.across.iter().chain(self.down.iter())
    }

    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.across.is_empty() && self.down.is_empty()
    }
}
