use crate::config::ParseOptions;
use crate::grid::{Grid, Position, Tile};
use crate::parser::error::ParseError;
use crate::parser::segment::Section;

/// Build the tile matrix from a grid section.
///
/// The block marker yields a block tile, the open marker a letterless open
/// tile, and any other character a letter tile (normalized to uppercase).
pub fn build_grid(
    section: &Section,
    file_id: usize,
    options: &ParseOptions,
) -> Result<Grid, ParseError> {
    let width = section
        .lines
        .first()
        .map_or(0, |line| line.text.chars().count());
    let mut rows = Vec::with_capacity(section.lines.len());

    for (row, line) in section.lines.iter().enumerate() {
        let chars: Vec<char> = line.text.chars().collect();
        if chars.len() != width {
            return Err(ParseError::grid(
                format!(
                    "ragged grid: row {} has {} cells, expected {}",
                    row + 1,
                    chars.len(),
                    width
                ),
                line.span.clone(),
                file_id,
            ));
        }

        let tiles = chars
            .into_iter()
            .enumerate()
            .map(|(col, ch)| {
                let position = Position { row, col };
                if ch == options.block_marker {
                    Tile::block(position)
                } else if ch == options.open_marker {
                    Tile::open(position)
                } else {
                    Tile::letter(position, ch.to_ascii_uppercase())
                }
            })
            .collect();
        rows.push(tiles);
    }

    Ok(Grid::new(rows, options.block_marker, options.open_marker))
}
