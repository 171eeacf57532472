//! Border-padded life grid and its text rendering.

use std::fmt;

use rayon::prelude::*;

use crate::error::LifeError;
use crate::platform;

/// A `rows x cols` board of cell states.
///
/// Storage is `(rows + 2) x (cols + 2)`: a one-cell dead border surrounds
/// the logical board so the 8-neighbor count never branches on bounds.
/// Border cells are never mutated; logical coordinate `(r, c)` lives at
/// storage `(r + 1, c + 1)`.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Zero rows or columns are rejected.
    pub fn new(rows: usize, cols: usize) -> Result<Self, LifeError> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![false; (rows + 2) * (cols + 2)],
        })
    }

    /// All-dead grid with the same logical dimensions as `self`.
    pub(crate) fn same_shape(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; self.cells.len()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "cell out of range");
        self.cells[self.storage_index(row, col)]
    }

    #[inline]
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.rows && col < self.cols, "cell out of range");
        let idx = self.storage_index(row, col);
        self.cells[idx] = alive;
    }

    /// Number of live cells among the 8 neighbors of `(row, col)`.
    ///
    /// Reads one cell past the logical edge in every direction; those reads
    /// land on the dead border, so no bounds test is needed.
    #[inline]
    pub fn alive_surrounding(&self, row: usize, col: usize) -> usize {
        assert!(row < self.rows && col < self.cols, "cell out of range");
        let width = self.cols + 2;
        let center = (row + 1) * width + (col + 1);
        let above = center - width;
        let below = center + width;

        self.cells[above - 1] as usize
            + self.cells[above] as usize
            + self.cells[above + 1] as usize
            + self.cells[center - 1] as usize
            + self.cells[center + 1] as usize
            + self.cells[below - 1] as usize
            + self.cells[below] as usize
            + self.cells[below + 1] as usize
    }

    /// Total number of live cells.
    pub fn population(&self) -> usize {
        // Border cells are always dead, so counting storage counts the board.
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Flat storage index of logical `(row, col)`.
    #[inline]
    pub(crate) fn storage_index(&self, row: usize, col: usize) -> usize {
        (row + 1) * (self.cols + 2) + (col + 1)
    }

    pub(crate) fn storage_mut_ptr(&mut self) -> *mut bool {
        self.cells.as_mut_ptr()
    }

    /// Render the board as text, one newline-terminated line per row,
    /// `'x'` for a live cell and a space for a dead one.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            self.render_row_into(row, &mut out);
            out.push('\n');
        }
        out
    }

    /// Parallel render, partitioned by the platform parallelism hint.
    /// Output is byte-identical to [`Grid::render`].
    pub fn render_parallel(&self) -> String {
        self.render_parallel_with(platform::parallelism_hint())
    }

    /// Parallel render with an explicit partition count.
    ///
    /// Row `i` belongs to partition `i % parts`; each partition renders its
    /// rows into a private buffer, and after the join the rows are stitched
    /// back together top to bottom by the same modulo assignment, so the
    /// result does not depend on task completion order.
    pub fn render_parallel_with(&self, parts: usize) -> String {
        let parts = parts.max(1);
        let buckets: Vec<Vec<String>> = (0..parts)
            .into_par_iter()
            .map(|part| {
                let mut rendered = Vec::with_capacity(self.rows.div_ceil(parts));
                let mut row = part;
                while row < self.rows {
                    let mut line = String::with_capacity(self.cols);
                    self.render_row_into(row, &mut line);
                    rendered.push(line);
                    row += parts;
                }
                rendered
            })
            .collect();

        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            out.push_str(&buckets[row % parts][row / parts]);
            out.push('\n');
        }
        out
    }

    fn render_row_into(&self, row: usize, out: &mut String) {
        let start = self.storage_index(row, 0);
        for &alive in &self.cells[start..start + self.cols] {
            out.push(if alive { 'x' } else { ' ' });
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
