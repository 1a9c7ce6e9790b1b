//! Board module - manages the tile grid
//!
//! The board is an N x N grid of tile values stored as a flat row-major vector.
//! A value of 0 is an empty cell; every other value is a power of two >= 2.
//! Coordinates are (row, col) with (0, 0) in the top-left corner.
//!
//! Lines are the unit the slide logic works on. [`Board::line_indices`] yields
//! the flat indices of one row or column ordered from the edge the tiles slide
//! toward, which lets every direction reuse the same leftward reducer.

use std::fmt;

use crate::types::{
    can_merge, is_valid_tile_value, Direction, Position, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

/// The game board - N columns x N rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<u32>,
}

impl Board {
    /// Create a new empty board
    ///
    /// `size` is clamped into the supported range.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from rows.
    ///
    /// Returns `None` unless the rows form a square of supported size holding
    /// only valid tile values.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return None;
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return None;
            }
            if !row.iter().copied().all(is_valid_tile_value) {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self { size, cells })
    }

    /// Convert to nested rows (used by the state codec).
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    /// Position of a flat index.
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.size, index % self.size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the value at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Get the value at a position (0 when out of bounds)
    pub fn at(&self, pos: Position) -> u32 {
        self.get(pos.row, pos.col).unwrap_or(0)
    }

    /// Set the value at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Flat indices of empty cells in row-major order
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn contains(&self, value: u32) -> bool {
        self.cells.contains(&value)
    }

    /// Positions of all occupied cells in row-major order
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// Check whether any two orthogonal neighbours hold the same tile
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let v = self.cells[row * n + col];
                if !can_merge(v) {
                    continue;
                }
                if col + 1 < n && self.cells[row * n + col + 1] == v {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Flat indices of line `k` for a slide in `direction`, ordered from the
    /// destination edge.
    ///
    /// Line `k` is row `k` for horizontal slides and column `k` for vertical ones.
    pub fn line_indices(&self, direction: Direction, k: usize) -> Vec<usize> {
        let n = self.size;
        let mut indices: Vec<usize> = if direction.is_horizontal() {
            (0..n).map(|col| k * n + col).collect()
        } else {
            (0..n).map(|row| row * n + k).collect()
        };
        if direction.is_reversed() {
            indices.reverse();
        }
        indices
    }

    /// Read the values at the given flat indices
    pub fn read_line(&self, indices: &[usize]) -> Vec<u32> {
        indices.iter().map(|&i| self.cells[i]).collect()
    }

    /// Write values back to the given flat indices
    pub fn write_line(&mut self, indices: &[usize], values: &[u32]) {
        for (&i, &v) in indices.iter().zip(values) {
            self.cells[i] = v;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Set a cell by flat index (no-op when out of range)
    pub(crate) fn set_index(&mut self, index: usize, value: u32) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}", "------+".repeat(self.size));
        writeln!(f, "{}", border)?;
        for row in self.cells.chunks(self.size) {
            write!(f, "|")?;
            for &val in row {
                if val == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}
