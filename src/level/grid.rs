//! The tile grid
//!
//! Row-major 2D array of optional tile ids. Serializes transparently as a
//! JSON array of arrays, one entry per column, integer tile id or null.

use serde::{Deserialize, Serialize};

/// Index into the sprite atlas; a cell holding `None` is empty
pub type TileId = u8;

/// Row-major grid of optional tile ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelGrid {
    cells: Vec<Vec<Option<TileId>>>,
}

impl LevelGrid {
    /// Empty grid of the given size (every cell `None`)
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::filled(cols, rows, None)
    }

    /// Grid of the given size with every cell set to `fill`
    pub fn filled(cols: usize, rows: usize, fill: Option<TileId>) -> Self {
        Self {
            cells: vec![vec![fill; cols]; rows],
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns, taken from the first row
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }

    /// Tile at (row, col), or `None` when the cell is empty or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<TileId> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
    }

    /// Set the tile at (row, col). Out-of-range writes are silently ignored
    /// so stray mouse clicks outside the level are harmless.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<TileId>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = tile;
        }
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<TileId>]> {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// True if any row has a length different from the first row
    pub fn is_ragged(&self) -> bool {
        let cols = self.cols();
        self.cells.iter().any(|row| row.len() != cols)
    }
}
