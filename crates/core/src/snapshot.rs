use serde::Serialize;

use crate::pieces::{Shape, Tetromino};
use crate::types::{Cell, GamePhase, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute board coordinates of the piece's occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Read-only view of a game for render consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, row-major; the active piece is not merged in.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.board.clear();
        self.active = None;
        self.next = None;
        self.phase = GamePhase::Ready;
        self.paused = false;
        self.game_over = false;
        self.piece_id = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Locked cell at (x, y); None when empty or out of bounds
    pub fn cell(&self, x: i16, y: i16) -> Cell {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return None;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    /// Cell as it should be drawn: the active piece over the locked cells
    pub fn visible_cell(&self, x: i16, y: i16) -> Cell {
        if let Some(active) = &self.active {
            if active.cells().any(|c| c == (x, y)) {
                return Some(active.kind.color());
            }
        }
        self.cell(x, y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            next: None,
            phase: GamePhase::Ready,
            paused: false,
            game_over: false,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
