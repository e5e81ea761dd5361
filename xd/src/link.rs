use crate::clue::{Clue, ClueLabel, ClueSet, Direction};
use crate::config::ParseOptions;
use crate::grid::{Grid, Position};
use crate::report::Diagnostic;

/// What linking produced: report errors, plus the labels whose validation
/// failed. The linter skips those clues.
#[derive(Debug, Default)]
pub struct LinkOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub failed: Vec<ClueLabel>,
}

impl LinkOutcome {
    fn fail(&mut self, clue: &Clue, message: String) {
        self.diagnostics.push(Diagnostic::error(message).about_clue(clue));
        self.failed.push(clue.label);
    }
}

/// Resolve every clue to a grid position and derived word length, then
/// validate its answer against the grid.
///
/// A clue's position is its `^Start:` annotation when it has one; otherwise
/// the grid's word starts are replayed and clues pair with them by
/// direction and source order. Validation failures never abort: each
/// becomes a report error and the remaining clues still resolve.
pub fn link(grid: &mut Grid, clues: &mut ClueSet, options: &ParseOptions) -> LinkOutcome {
    let starts = grid.word_starts();
    let mut outcome = LinkOutcome::default();

    for direction in [Direction::Across, Direction::Down] {
        let replayed: Vec<Position> = starts
            .iter()
            .filter(|start| start.direction == direction)
            .map(|start| start.position)
            .collect();

        for (index, clue) in clues.list_mut(direction).iter_mut().enumerate() {
            let position = match clue.explicit_start {
                Some(position) => position,
                None => match replayed.get(index) {
                    Some(&position) => position,
                    None => {
                        outcome.fail(
                            clue,
                            format!(
                                "no {} word in the grid for clue {}",
                                direction, clue.label
                            ),
                        );
                        continue;
                    }
                },
            };
            validate_clue(grid, clue, position, options, &mut outcome);
        }
    }

    outcome
}

/// Walk the word, check length, then letters. Open tiles take their letter
/// from the answer; a crossing answer that later disagrees with a
/// back-filled letter fails here too.
fn validate_clue(
    grid: &mut Grid,
    clue: &mut Clue,
    start: Position,
    options: &ParseOptions,
    outcome: &mut LinkOutcome,
) {
    let cells = grid.word_cells(start, clue.label.direction);
    if cells.is_empty() {
        outcome.fail(
            clue,
            format!(
                "clue {} starts on a blocked or out-of-bounds cell at {}",
                clue.label, start
            ),
        );
        return;
    }

    clue.position = Some(start);
    clue.length = Some(cells.len());

    let letters: Vec<char> = clue
        .letters(options.split_character)
        .chars()
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    if letters.len() != cells.len() {
        outcome.fail(
            clue,
            format!(
                "clue {} answer has {} letters but its grid word has {} cells",
                clue.label,
                letters.len(),
                cells.len()
            ),
        );
        return;
    }

    for (&position, letter) in cells.iter().zip(letters) {
        let Some(tile) = grid.tile_mut(position) else {
            continue;
        };
        match tile.letter {
            // Open tile: the answer is authoritative.
            None => tile.letter = Some(letter),
            Some(existing) if existing.eq_ignore_ascii_case(&letter) => {}
            Some(existing) => {
                outcome.fail(
                    clue,
                    format!(
                        "clue {} answer letter '{}' disagrees with grid letter '{}' at {}",
                        clue.label, letter, existing, position
                    ),
                );
                return;
            }
        }
    }
}
