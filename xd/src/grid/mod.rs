use std::fmt;

use serde::Serialize;

use crate::clue::Direction;

/// Zero-based cell coordinates, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    #[serde(skip)]
    pub position: Position,
    /// The solution letter, if known. Blocks never carry one; open tiles get
    /// theirs back-filled from clue answers during linking.
    pub letter: Option<char>,
    pub is_block: bool,
}

impl Tile {
    pub fn block(position: Position) -> Self {
        Tile {
            position,
            letter: None,
            is_block: true,
        }
    }

    pub fn letter(position: Position, letter: char) -> Self {
        Tile {
            position,
            letter: Some(letter),
            is_block: false,
        }
    }

    /// A letterless cell in a template grid.
    pub fn open(position: Position) -> Self {
        Tile {
            position,
            letter: None,
            is_block: false,
        }
    }
}

/// A numbered cell where at least one word begins. Cells starting both an
/// across and a down word appear twice with the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStart {
    pub number: u32,
    pub position: Position,
    pub direction: Direction,
}

/// The rectangular tile matrix.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
    #[serde(skip)]
    block_marker: char,
    #[serde(skip)]
    open_marker: char,
}

impl Grid {
    /// Invariant: all rows have equal length (the grid builder enforces it).
    pub fn new(rows: Vec<Vec<Tile>>, block_marker: char, open_marker: char) -> Self {
        Grid {
            rows,
            block_marker,
            open_marker,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.rows.get(position.row)?.get(position.col)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.rows.get_mut(position.row)?.get_mut(position.col)
    }

    /// Out-of-bounds cells count as blocked, so edges fall out of the same
    /// check as blocks.
    fn blocked(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or(true, |tile| tile.is_block)
    }

    /// Replay reading-order numbering over the grid.
    ///
    /// Row-major scan: a non-block cell starts an across word when its left
    /// neighbor is a block or the edge and its right neighbor is an in-grid
    /// non-block (symmetric for down). One shared counter; a cell starting
    /// both directions consumes a single number.
    ///
    /// Both the linker and the migrator resolve implicit clue positions
    /// through this one routine, so they cannot disagree.
    pub fn word_starts(&self) -> Vec<WordStart> {
        let mut starts = Vec::new();
        let mut number = 0u32;

        for row in 0..self.height() {
            for col in 0..self.width() {
                if self.blocked(row, col) {
                    continue;
                }
                let across = (col == 0 || self.blocked(row, col - 1)) && !self.blocked(row, col + 1);
                let down = (row == 0 || self.blocked(row - 1, col)) && !self.blocked(row + 1, col);
                if !across && !down {
                    continue;
                }

                number += 1;
                let position = Position { row, col };
                if across {
                    starts.push(WordStart {
                        number,
                        position,
                        direction: Direction::Across,
                    });
                }
                if down {
                    starts.push(WordStart {
                        number,
                        position,
                        direction: Direction::Down,
                    });
                }
            }
        }

        starts
    }

    /// The cells of the word beginning at `start`, walking in `direction`
    /// until a block or the grid edge. Empty if `start` itself is blocked or
    /// out of bounds.
    pub fn word_cells(&self, start: Position, direction: Direction) -> Vec<Position> {
        let mut cells = Vec::new();
        let (mut row, mut col) = (start.row, start.col);

        while !self.blocked(row, col) {
            cells.push(Position { row, col });
            match direction {
                Direction::Across => col += 1,
                Direction::Down => row += 1,
            }
        }

        cells
    }
}

impl fmt::Display for Grid {
    /// Re-emits the grid section: one character per tile, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for tile in row {
                let ch = if tile.is_block {
                    self.block_marker
                } else {
                    tile.letter.unwrap_or(self.open_marker)
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
