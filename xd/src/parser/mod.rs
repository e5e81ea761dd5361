pub mod error;
mod clue;
mod grid;
mod segment;

pub use error::{ParseError, ParseErrorKind};
pub use segment::{Line, Section, SectionKind};

pub(crate) use clue::{split_annotation_line, split_clue_line};
pub(crate) use grid::build_grid;
pub(crate) use segment::segment;

use crate::Crossword;
use crate::clue::ClueSet;
use crate::config::ParseOptions;
use crate::link;
use crate::lint;
use crate::report::Report;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
    options: ParseOptions,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser::with_options(source, file_id, ParseOptions::default())
    }

    pub fn with_options(source: String, file_id: usize, options: ParseOptions) -> Self {
        Parser {
            source,
            file_id,
            options,
        }
    }

    /// Parse the source xd document into a complete [`Crossword`].
    ///
    /// Fatal failures (section discovery, ragged grids, unparsable clue
    /// lines) come back as `Err`. Grid/answer disagreements and lint
    /// findings are not fatal: the crossword is returned with them recorded
    /// in its report, and `report.success` is false when any are errors.
    pub fn parse(&self) -> Result<Crossword, Vec<ParseError>> {
        let sections =
            segment::segment(&self.source, self.file_id, &self.options).map_err(|e| vec![e])?;

        let mut meta: Vec<(String, String)> = Vec::new();
        let mut notes: Vec<String> = Vec::new();
        let mut clues = ClueSet::default();
        let mut grid = None;
        let mut fatal: Vec<ParseError> = Vec::new();

        for section in &sections {
            match section.kind {
                SectionKind::Meta => meta.extend(parse_meta(section)),
                SectionKind::Grid => match grid::build_grid(section, self.file_id, &self.options) {
                    Ok(built) => grid = Some(built),
                    Err(e) => fatal.push(e),
                },
                SectionKind::Clues => {
                    match clue::parse_clues(section, self.file_id, &self.options) {
                        Ok(parsed) => {
                            for entry in parsed {
                                clues.push(entry);
                            }
                        }
                        Err(e) => fatal.push(e),
                    }
                }
                SectionKind::Notes => notes.push(
                    section
                        .lines
                        .iter()
                        .map(|line| line.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
            }
        }

        if !fatal.is_empty() {
            return Err(fatal);
        }
        let Some(mut grid) = grid else {
            // segment() guarantees a grid section, so this only guards
            // against that invariant breaking.
            return Err(vec![ParseError::structural(
                "no grid section found",
                0..self.source.len(),
                self.file_id,
            )]);
        };

        let outcome = link::link(&mut grid, &mut clues, &self.options);
        let mut diagnostics = outcome.diagnostics;
        if self.options.lint_enabled {
            let context = lint::Context {
                meta: &meta,
                clues: &clues,
                failed: &outcome.failed,
                options: &self.options,
            };
            diagnostics.extend(lint::run(&context));
        }

        Ok(Crossword {
            meta,
            grid,
            clues,
            notes,
            report: Report::assemble(diagnostics),
            source_id: self.file_id,
        })
    }
}

fn parse_meta(section: &Section) -> Vec<(String, String)> {
    section
        .lines
        .iter()
        .filter_map(|line| {
            line.text
                .split_once(':')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
