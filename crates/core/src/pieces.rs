//! Pieces module - Tetromino shapes and rotation
//!
//! Each kind has a canonical occupancy matrix. Rotation is a pure transform of that
//! matrix (transpose, then reverse every row, i.e. a 90° clockwise turn) and never
//! looks at the board; the controller validates the result and drops it if it collides.
//! There is no wall-kick search.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Color, PieceKind, Rotation};

/// Largest side of a shape matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single occupied cell relative to the piece anchor, as (column, row)
pub type CellOffset = (i16, i16);

/// Occupied offsets of a shape, stack-only
pub type ShapeCells = ArrayVec<CellOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Occupancy matrix of a piece
///
/// Only the top-left `height` x `width` block of `mask` is meaningful; everything
/// outside it is always `false` so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    width: u8,
    height: u8,
    mask: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    const fn from_bits(
        width: u8,
        height: u8,
        bits: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    ) -> Self {
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < height as usize {
            let mut col = 0;
            while col < width as usize {
                mask[row][col] = bits[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self {
            width,
            height,
            mask,
        }
    }

    /// Width of the bounding box in cells
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Height of the bounding box in cells
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for row in 0..self.height as usize {
            for col in 0..self.width as usize {
                if self.mask[row][col] {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Shape {
        let old_height = self.height as usize;
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

        // New row r is old column r read bottom-up.
        for (r, new_row) in mask.iter_mut().enumerate().take(self.width as usize) {
            for (c, cell) in new_row.iter_mut().enumerate().take(old_height) {
                *cell = self.mask[old_height - 1 - c][r];
            }
        }

        Shape {
            width: self.height,
            height: self.width,
            mask,
        }
    }
}

const I_SHAPE: Shape = Shape::from_bits(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = Shape::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::from_bits(3, 2, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::from_bits(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::from_bits(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::from_bits(3, 2, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::from_bits(3, 2, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// Get the canonical (spawn orientation) shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// A piece instance: kind, current shape and orientation, and anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    /// Column of the bounding box's left edge
    pub x: i16,
    /// Row of the bounding box's top edge
    pub y: i16,
}

impl Tetromino {
    /// Create a piece in its canonical orientation anchored at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            shape: get_shape(kind),
            x: 0,
            y: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Same piece with its anchor moved to (x, y)
    pub fn at(self, x: i16, y: i16) -> Self {
        Self { x, y, ..self }
    }

    /// Spawn anchor on a board of the given width: horizontally centered
    /// (rounding left), top edge on row 0.
    pub fn spawn_position(&self, board_width: u16) -> (i16, i16) {
        let free = board_width as i16 - self.shape.width() as i16;
        (free.div_euclid(2), 0)
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Rotate a piece 90° clockwise in place of its anchor.
///
/// This is a pure shape transform; legality is the caller's concern.
pub fn rotate(piece: &Tetromino) -> Tetromino {
    Tetromino {
        shape: piece.shape.rotated_cw(),
        rotation: piece.rotation.rotate_cw(),
        ..*piece
    }
}
