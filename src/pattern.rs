//! Text-pattern parsing for initial board states.
//!
//! One line per row, read top to bottom: `'x'` marks a live cell, any other
//! character (or a missing one) leaves the cell dead. Only the upper-left
//! `rows x cols` window of the text is used; anything past the configured
//! shape is ignored, and cells the text does not cover stay dead.

use std::path::Path;

use crate::error::LifeError;
use crate::grid::Grid;

/// Populate a `rows x cols` grid from pattern text.
pub fn parse(text: &str, rows: usize, cols: usize) -> Result<Grid, LifeError> {
    let mut grid = Grid::new(rows, cols)?;
    for (row, line) in text.lines().take(rows).enumerate() {
        for (col, ch) in line.chars().take(cols).enumerate() {
            if ch == 'x' {
                grid.set_alive(row, col, true);
            }
        }
    }
    Ok(grid)
}

/// Load a pattern file into a `rows x cols` grid.
pub fn load(path: &Path, rows: usize, cols: usize) -> Result<Grid, LifeError> {
    let text = std::fs::read_to_string(path).map_err(|source| LifeError::MalformedInput {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn x_marks_alive_everything_else_dead() {
        let grid = parse("x.x\n.O \nxxx\n", 3, 3).unwrap();
        assert!(grid.is_alive(0, 0));
        assert!(!grid.is_alive(0, 1));
        assert!(grid.is_alive(0, 2));
        assert!(!grid.is_alive(1, 0));
        assert!(!grid.is_alive(1, 1));
        assert!(!grid.is_alive(1, 2));
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn short_lines_and_missing_rows_stay_dead() {
        let grid = parse("x\n", 3, 3).unwrap();
        assert!(grid.is_alive(0, 0));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn oversized_text_is_clipped_to_the_grid() {
        let grid = parse("xxxxx\nxxxxx\nxxxxx\n", 2, 2).unwrap();
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn load_of_missing_file_is_malformed_input() {
        let err = super::load(std::path::Path::new("no-such-pattern.txt"), 3, 3).unwrap_err();
        assert!(matches!(err, crate::error::LifeError::MalformedInput { .. }));
    }
}
