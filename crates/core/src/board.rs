//! Board module - manages the game grid
//!
//! The board is a W x H grid where each cell is empty or holds the color of a locked piece.
//! Uses a flat vector in row-major order, sized once at construction.
//! Coordinates: (x, y) where x grows to the right and y grows downwards; row 0 is the top.
//!
//! The board only reads and writes cells. Whether a piece may occupy a position is decided
//! by [`crate::collision::is_valid_position`] before anything is written here.

use crate::config::validate_dimensions;
use crate::error::{BoardError, ConfigError};
use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board, rejecting zero or oversized dimensions
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Create an empty 10x20 board
    pub fn standard() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check if (x, y) lies inside the grid
    #[inline]
    pub fn in_bounds(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and empty
    pub fn is_cell_empty(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Borrow one row, or None if `y` is outside the grid
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row and compact the rest downwards.
    ///
    /// Surviving rows keep their relative order and the vacated rows at the top are
    /// emptied, so the height never changes. Returns the number of rows removed.
    /// Uses a two-pointer pass with no allocation.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cleared = 0;
        let mut write_y = height;

        // Scan from bottom to top
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    // copy_within handles the overlapping ranges
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Write the piece's occupied cells into the grid with its anchor at (x, y).
    ///
    /// No collision check happens here. Every target cell is bounds-checked before
    /// anything is written, so a failed merge leaves the board untouched.
    pub fn merge(&mut self, piece: &Tetromino, x: i16, y: i16) -> Result<(), BoardError> {
        for (dx, dy) in piece.shape.cells() {
            let (px, py) = (x + dx, y + dy);
            if !self.in_bounds(px, py) {
                return Err(BoardError::OutOfBounds { x: px, y: py });
            }
        }

        let color = Some(piece.color());
        for (dx, dy) in piece.shape.cells() {
            self.set(x + dx, y + dy, color);
        }

        Ok(())
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into `out` (row-major), reusing its allocation
    pub fn write_color_grid(&self, out: &mut Vec<Cell>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Create from a 2D vector for testing
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        let height = cells_2d.len();
        let width = cells_2d.first().map_or(0, Vec::len);
        assert!(cells_2d.iter().all(|row| row.len() == width));

        Self {
            width: width as u16,
            height: height as u16,
            cells: cells_2d.into_iter().flatten().collect(),
        }
    }

    /// Convert to 2D vector for testing
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width as usize)
            .map(<[Cell]>::to_vec)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Tetromino;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_non_square_index() {
        let board = Board::new(4, 6).unwrap();
        assert_eq!(board.cells().len(), 24);
        assert_eq!(board.index(3, 5), Some(23));
        assert_eq!(board.index(4, 0), None);
    }

    #[test]
    fn test_board_rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 20),
            Err(ConfigError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Board::new(10, 0),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::standard();

        board.set(0, 0, Some(Color::Cyan));
        board.set(5, 10, Some(Color::Purple));

        assert_eq!(board.get(0, 0), Some(Some(Color::Cyan)));
        assert_eq!(board.get(5, 10), Some(Some(Color::Purple)));

        assert_eq!(board.cells[0], Some(Color::Cyan));
        assert_eq!(board.cells[10 * 10 + 5], Some(Color::Purple));
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 20];
        cells_2d[5][3] = Some(Color::Yellow);
        cells_2d[10][7] = Some(Color::Orange);

        let board = Board::from_cells(cells_2d.clone());
        assert_eq!(cells_2d, board.to_cells());
    }

    #[test]
    fn test_clear_lines_keeps_order_of_survivors() {
        let mut cells_2d = vec![vec![None; 3]; 5];
        cells_2d[1][0] = Some(Color::Red);
        cells_2d[2] = vec![Some(Color::Blue); 3];
        cells_2d[3][2] = Some(Color::Green);
        cells_2d[4] = vec![Some(Color::Blue); 3];
        let mut board = Board::from_cells(cells_2d);

        assert_eq!(board.clear_lines(), 2);

        let rows = board.to_cells();
        assert_eq!(rows[0], vec![None; 3]);
        assert_eq!(rows[1], vec![None; 3]);
        assert_eq!(rows[2], vec![None; 3]);
        assert_eq!(rows[3], vec![Some(Color::Red), None, None]);
        assert_eq!(rows[4], vec![None, None, Some(Color::Green)]);
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut board = Board::standard();
        let piece = Tetromino::new(PieceKind::I);

        // Cells at x = 8..=11, the last two are off the right edge.
        let err = board.merge(&piece, 8, 0).unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { x: 10, y: 0 });
        assert!(board.cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_write_color_grid_replaces_contents() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(2, 1, Some(Color::Blue));

        let mut out = vec![Some(Color::Red); 10];
        board.write_color_grid(&mut out);
        assert_eq!(out, vec![None, None, None, None, None, Some(Color::Blue)]);
    }

    #[test]
    fn test_merge_rejects_cells_above_top() {
        let mut board = Board::standard();
        let piece = Tetromino::new(PieceKind::O);
        assert!(board.merge(&piece, 4, -1).is_err());
    }
}
