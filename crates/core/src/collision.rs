//! Placement check of a shape against the board and its bounds.

use crate::board::Board;
use crate::pieces::Shape;

/// Whether `shape` anchored at (x, y) fits on `board`.
///
/// A cell is rejected when it is left or right of the grid, at or below the floor,
/// or inside the grid on a filled cell. Cells above the top (y < 0) are always
/// accepted so pieces can sit partly off the top of the board.
pub fn is_valid_position(board: &Board, shape: &Shape, x: i16, y: i16) -> bool {
    let width = board.width() as i16;
    let height = board.height() as i16;

    shape.cells().iter().all(|&(dx, dy)| {
        let px = x + dx;
        let py = y + dy;
        if px < 0 || px >= width || py >= height {
            return false;
        }
        py < 0 || board.is_cell_empty(px, py)
    })
}
