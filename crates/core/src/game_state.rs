//! Game state module - the game controller
//!
//! This module ties together all core components: board, pieces, RNG, scoring and the
//! drop scheduler. It owns every piece of mutable game state and exposes it only
//! through commands, accessors, snapshots and queued events.
//!
//! # Placement
//!
//! Every downward attempt (gravity or soft drop) goes through the same steps:
//!
//! 1. **Falling**: if the piece fits one row lower it moves down and nothing else happens.
//! 2. **Locking**: otherwise it is merged into the board at once (there is no lock delay)
//!    and full rows are cleared, scored and counted.
//! 3. **Spawning**: the buffered next piece becomes active, centered on row 0, and a new
//!    next piece is drawn. If it does not fit, the game is over.

use log::{debug, error, info, trace};

use crate::board::Board;
use crate::collision::is_valid_position;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::pieces::{rotate, Tetromino};
use crate::rng::{PieceFactory, RandomSource, SimpleRng};
use crate::scheduler::DropScheduler;
use crate::scoring::{LevelController, ScoreKeeper};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameEvent, GamePhase, PieceKind};

/// Result of one downward movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Not playing, or no drop was due
    Ignored,
    /// The piece moved down one row
    Moved,
    /// The piece locked and the next one spawned
    Locked { lines_cleared: u32 },
    /// The piece locked and the next one did not fit
    ToppedOut,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: EngineConfig,
    board: Board,
    factory: PieceFactory<R>,
    active: Option<Tetromino>,
    next: Option<Tetromino>,
    phase: GamePhase,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    score: ScoreKeeper,
    levels: LevelController,
    scheduler: DropScheduler,
    /// Notifications not yet drained by the host.
    events: Vec<GameEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new 10x20 game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = EngineConfig::default();
        let levels = LevelController::from_config(&config);
        Self {
            board: Board::standard(),
            factory: PieceFactory::standard(SimpleRng::new(seed)),
            scheduler: DropScheduler::new(levels.drop_interval_ms()),
            levels,
            config,
            active: None,
            next: None,
            phase: GamePhase::Ready,
            piece_id: 0,
            score: ScoreKeeper::new(),
            events: Vec::new(),
        }
    }

    /// Create a game from a configuration and an RNG seed
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game with an explicit random source.
    ///
    /// Fails if the configuration is invalid; nothing is constructed in that case.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        let factory = PieceFactory::new(config.pieces.clone(), rng)?;
        let levels = LevelController::from_config(&config);

        Ok(Self {
            board,
            factory,
            scheduler: DropScheduler::new(levels.drop_interval_ms()),
            levels,
            config,
            active: None,
            next: None,
            phase: GamePhase::Ready,
            piece_id: 0,
            score: ScoreKeeper::new(),
            events: Vec::new(),
        })
    }

    /// Reset everything and start a new game, whatever the current phase.
    ///
    /// Events left over from the previous game are discarded.
    pub fn start(&mut self) {
        self.board.clear();
        self.begin();
    }

    /// Start a new game on a prefilled board (puzzle setups, tests).
    ///
    /// The board must have the configured dimensions.
    pub fn start_with_board(&mut self, board: Board) -> Result<(), ConfigError> {
        if board.width() != self.config.width || board.height() != self.config.height {
            return Err(ConfigError::BoardMismatch {
                width: board.width(),
                height: board.height(),
                expected_width: self.config.width,
                expected_height: self.config.height,
            });
        }
        self.board = board;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.events.clear();
        self.score = ScoreKeeper::new();
        self.levels = LevelController::from_config(&self.config);
        self.scheduler = DropScheduler::new(self.levels.drop_interval_ms());
        self.piece_id = 0;
        self.active = None;
        self.next = Some(self.factory.next_piece());
        self.phase = GamePhase::Playing;

        info!(
            "game started on {}x{} board",
            self.board.width(),
            self.board.height()
        );
        self.spawn_piece();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::Ready
    }

    pub fn playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.levels.level()
    }

    pub fn lines(&self) -> u32 {
        self.levels.lines()
    }

    /// Current automatic drop cadence
    pub fn drop_interval_ms(&self) -> u32 {
        self.scheduler.interval_ms()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_piece(&self) -> Option<Tetromino> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_color_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(|p| p.kind);
        out.phase = self.phase;
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.piece_id = self.piece_id();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Events emitted since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event, oldest first.
    ///
    /// The queue is only emptied here and by `start()`; hosts that never drain it keep
    /// every event of the current game in memory.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Promote the buffered next piece and draw a new one
    fn spawn_piece(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.factory.next_piece(),
        };
        self.next = Some(self.factory.next_piece());

        let (x, y) = piece.spawn_position(self.board.width());
        let piece = piece.at(x, y);

        if !is_valid_position(&self.board, &piece.shape, x, y) {
            self.active = None;
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        info!(
            "game over: score {}, lines {}, level {}",
            self.score(),
            self.lines(),
            self.level()
        );
        self.events.push(GameEvent::GameOver {
            score: self.score(),
            lines: self.lines(),
            level: self.level(),
        });
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        if !self.playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let (x, y) = (active.x + dx, active.y + dy);
        if !is_valid_position(&self.board, &active.shape, x, y) {
            return false;
        }

        self.active = Some(active.at(x, y));
        true
    }

    /// Move the active piece one column left; false if blocked or not playing
    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    /// Move the active piece one column right; false if blocked or not playing
    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate the active piece clockwise about its anchor.
    ///
    /// If the rotated shape does not fit where the piece is, nothing changes.
    pub fn rotate_cw(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = rotate(&active);
        if !is_valid_position(&self.board, &rotated.shape, rotated.x, rotated.y) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// A lock queues events; see [`GameState::drain_events`].
    pub fn soft_drop(&mut self) -> DropOutcome {
        if !self.playing() {
            return DropOutcome::Ignored;
        }
        self.step_down()
    }

    fn step_down(&mut self) -> DropOutcome {
        if self.active.is_none() {
            return DropOutcome::Ignored;
        }
        if self.try_move(0, 1) {
            return DropOutcome::Moved;
        }
        self.lock_piece()
    }

    /// Merge the active piece into the board, clear lines and spawn the next piece
    fn lock_piece(&mut self) -> DropOutcome {
        let Some(active) = self.active.take() else {
            return DropOutcome::Ignored;
        };

        if let Err(err) = self.board.merge(&active, active.x, active.y) {
            // Positions are validated before every move, so this is a broken invariant.
            error!("failed to lock {:?}: {}", active.kind, err);
            self.end_game();
            return DropOutcome::ToppedOut;
        }

        let cleared = self.board.clear_lines() as u32;
        self.record_clear(active.kind, cleared);

        if self.spawn_piece() {
            DropOutcome::Locked {
                lines_cleared: cleared,
            }
        } else {
            DropOutcome::ToppedOut
        }
    }

    /// Update score, lines and level after a lock
    fn record_clear(&mut self, kind: PieceKind, cleared: u32) {
        debug!("locked {:?}, cleared {} line(s)", kind, cleared);
        self.events.push(GameEvent::PieceLocked {
            kind,
            lines_cleared: cleared,
        });

        if cleared == 0 {
            return;
        }

        // Points use the level the clear happened at.
        let delta = self.score.award(cleared as usize, self.levels.level());
        if delta > 0 {
            self.events.push(GameEvent::ScoreChanged {
                score: self.score.score(),
                delta,
            });
        }

        let level_up = self.levels.record_lines(cleared);
        self.events.push(GameEvent::LinesChanged {
            lines: self.levels.lines(),
            cleared,
        });

        if let Some(up) = level_up {
            debug!(
                "level {} reached, drop interval {}ms",
                up.level, up.drop_interval_ms
            );
            self.scheduler.set_interval(up.drop_interval_ms);
            self.events.push(GameEvent::LevelChanged {
                level: up.level,
                drop_interval_ms: up.drop_interval_ms,
            });
        }
    }

    /// Suspend the game; false unless it was playing
    pub fn pause(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Continue a paused game. The drop interval restarts from zero.
    pub fn resume(&mut self) -> bool {
        if !self.paused() {
            return false;
        }
        self.scheduler.reset();
        self.phase = GamePhase::Playing;
        true
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Like `soft_drop`, a drop that locks the piece queues events for `drain_events`.
    pub fn tick(&mut self, elapsed_ms: u32) -> DropOutcome {
        if !self.playing() || self.active.is_none() {
            return DropOutcome::Ignored;
        }
        if !self.scheduler.tick(elapsed_ms) {
            return DropOutcome::Ignored;
        }

        trace!("gravity drop");
        self.step_down()
    }

    /// Apply a command; returns whether it changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                self.start();
                true
            }
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop() != DropOutcome::Ignored,
            Command::RotateCw => self.rotate_cw(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::types::{Color, Rotation};

    fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedRng> {
        let rng = ScriptedRng::for_kinds(&PieceKind::ALL, kinds);
        GameState::with_rng(EngineConfig::default(), rng).unwrap()
    }

    fn fill_row_except(state: &mut GameState<impl RandomSource>, y: i16, gaps: &[i16]) {
        for x in 0..state.board.width() as i16 {
            if !gaps.contains(&x) {
                state.board.set(x, y, Some(Color::Red));
            }
        }
    }

    fn drop_until_locked<R: RandomSource>(state: &mut GameState<R>) -> DropOutcome {
        loop {
            match state.soft_drop() {
                DropOutcome::Moved => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert_eq!(state.phase(), GamePhase::Ready);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active.is_none());
        assert!(state.next.is_none());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = EngineConfig {
            width: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameState::with_config(config, 1),
            Err(ConfigError::InvalidDimensions { .. })
        ));

        let config = EngineConfig {
            pieces: Vec::new(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameState::with_config(config, 1),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();

        assert!(state.started());
        assert!(state.playing());
        assert!(state.active.is_some());
        assert!(state.next.is_some());
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_spawn_is_centered_on_row_zero() {
        let mut state = scripted(&[PieceKind::O, PieceKind::I]);
        state.start();

        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(state.next.unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_next_piece_becomes_active() {
        let mut state = scripted(&[PieceKind::T, PieceKind::S, PieceKind::Z]);
        state.start();
        assert_eq!(state.next.unwrap().kind, PieceKind::S);

        drop_until_locked(&mut state);

        assert_eq!(state.active.unwrap().kind, PieceKind::S);
        assert_eq!(state.next.unwrap().kind, PieceKind::Z);
        assert_eq!(state.piece_id, 2);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut state = GameState::new(12345);
        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert_eq!(state.soft_drop(), DropOutcome::Ignored);
        assert_eq!(state.tick(5000), DropOutcome::Ignored);
        assert!(!state.pause());
    }

    #[test]
    fn test_try_move() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();

        let initial_x = state.active.unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();

        // T spawns at x=3, so three moves reach the left wall.
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_left() {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_cw() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        state.soft_drop();

        assert!(state.rotate_cw());
        let active = state.active.unwrap();
        assert_eq!(active.rotation, Rotation::East);
        assert_eq!((active.shape.width(), active.shape.height()), (2, 3));
    }

    #[test]
    fn test_rotate_blocked_is_noop() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        // Vertical I at (3, 0) would need (3, 1..=3); block one of them.
        state.board.set(3, 2, Some(Color::Red));

        let before = state.active.unwrap();
        assert!(!state.rotate_cw());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_rotate_at_wall_has_no_kick() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        assert!(state.rotate_cw()); // vertical, 1 wide
        for _ in 0..10 {
            state.move_right();
        }
        assert_eq!(state.active.unwrap().x, 9);

        // Horizontal I at x=9 would cover x=9..=12.
        let before = state.active.unwrap();
        assert!(!state.rotate_cw());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_lock_is_immediate() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        state.start();

        for _ in 0..18 {
            assert_eq!(state.soft_drop(), DropOutcome::Moved);
        }
        // Resting on the floor; the next attempt locks with no delay.
        assert_eq!(
            state.soft_drop(),
            DropOutcome::Locked { lines_cleared: 0 }
        );
        assert_eq!(state.board.get(4, 19), Some(Some(Color::Yellow)));
        assert_eq!(state.board.get(5, 18), Some(Some(Color::Yellow)));
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_tick_gravity_uses_interval() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();

        assert_eq!(state.tick(999), DropOutcome::Ignored);
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.tick(1), DropOutcome::Moved);
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_pause_freezes_gravity_and_resume_restarts_interval() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();

        state.tick(900);
        assert!(state.pause());
        assert!(state.paused());
        assert_eq!(state.tick(5000), DropOutcome::Ignored);
        assert!(!state.move_left());
        assert_eq!(state.active.unwrap().y, 0);

        assert!(state.resume());
        // The 900ms from before the pause are gone.
        assert_eq!(state.tick(900), DropOutcome::Ignored);
        assert_eq!(state.tick(100), DropOutcome::Moved);
    }

    #[test]
    fn test_pause_resume_only_from_matching_phase() {
        let mut state = GameState::new(1);
        state.start();
        assert!(!state.resume());
        assert!(state.pause());
        assert!(!state.pause());
        assert!(state.resume());
    }

    #[test]
    fn test_line_clear_scores_at_current_level() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        fill_row_except(&mut state, 19, &[3, 4, 5, 6]);

        assert_eq!(
            drop_until_locked(&mut state),
            DropOutcome::Locked { lines_cleared: 1 }
        );
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 40);
        assert!((0..10).all(|x| state.board.get(x, 19) == Some(None)));
    }

    #[test]
    fn test_level_up_changes_drop_interval() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        state.levels.record_lines(9);
        fill_row_except(&mut state, 19, &[3, 4, 5, 6]);
        state.drain_events().for_each(drop);

        drop_until_locked(&mut state);

        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 900);
        // Scored at the level the clear happened at.
        assert_eq!(state.score(), 40);

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::PieceLocked {
                    kind: PieceKind::I,
                    lines_cleared: 1
                },
                GameEvent::ScoreChanged {
                    score: 40,
                    delta: 40
                },
                GameEvent::LinesChanged {
                    lines: 10,
                    cleared: 1
                },
                GameEvent::LevelChanged {
                    level: 2,
                    drop_interval_ms: 900
                },
            ]
        );
    }

    #[test]
    fn test_game_over_detection() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();

        // Block the spawn area of the next O piece.
        state.board.set(4, 1, Some(Color::Red));
        state.active = Some(state.active.unwrap().at(0, 18));

        assert_eq!(state.soft_drop(), DropOutcome::ToppedOut);
        assert!(state.game_over());
        assert!(state.active.is_none());
        assert!(matches!(
            state.pending_events().last(),
            Some(GameEvent::GameOver { .. })
        ));
    }

    #[test]
    fn test_game_over_stops_game() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.board.set(4, 1, Some(Color::Red));
        state.active = Some(state.active.unwrap().at(0, 18));
        state.soft_drop();
        assert!(state.game_over());

        let board_before = state.board.clone();
        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert_eq!(state.soft_drop(), DropOutcome::Ignored);
        assert_eq!(state.tick(10_000), DropOutcome::Ignored);
        assert!(!state.pause());
        assert_eq!(state.board, board_before);
    }

    #[test]
    fn test_start_resets_after_game_over() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.board.set(4, 1, Some(Color::Red));
        state.active = Some(state.active.unwrap().at(0, 18));
        state.soft_drop();
        assert!(state.game_over());

        assert!(state.apply(Command::Start));
        assert!(state.playing());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(state.board.cells().iter().all(Option::is_none));
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_start_discards_undrained_events() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.board.set(4, 1, Some(Color::Red));
        state.active = Some(state.active.unwrap().at(0, 18));
        state.soft_drop();
        assert_eq!(state.pending_events().len(), 2);

        state.start();
        assert!(state.pending_events().is_empty());
        assert_eq!(state.piece_id(), 1);
    }

    #[test]
    fn test_start_resets_while_paused() {
        let mut state = GameState::new(3);
        state.start();
        state.pause();
        state.start();
        assert!(state.playing());
    }

    #[test]
    fn test_start_with_board_checks_dimensions() {
        let mut state = GameState::new(3);
        let board = Board::new(8, 20).unwrap();
        assert!(matches!(
            state.start_with_board(board),
            Err(ConfigError::BoardMismatch { .. })
        ));
        assert!(!state.started());
    }

    #[test]
    fn test_apply_commands() {
        let mut state = scripted(&[PieceKind::T]);
        assert!(state.apply(Command::Start));

        let initial_x = state.active.unwrap().x;
        assert!(state.apply(Command::MoveRight));
        assert_eq!(state.active.unwrap().x, initial_x + 1);
        assert!(state.apply(Command::MoveLeft));
        assert_eq!(state.active.unwrap().x, initial_x);
        assert!(state.apply(Command::SoftDrop));
        assert_eq!(state.active.unwrap().y, 1);
        assert!(state.apply(Command::RotateCw));
        assert!(state.apply(Command::Pause));
        assert!(!state.apply(Command::MoveLeft));
        assert!(state.apply(Command::Resume));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = scripted(&[PieceKind::L, PieceKind::J]);
        state.start();
        state.board_mut().set(0, 19, Some(Color::Green));

        let snapshot = state.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (10, 20));
        assert_eq!(snapshot.cell(0, 19), Some(Color::Green));
        assert_eq!(snapshot.active.unwrap().kind, PieceKind::L);
        assert_eq!(snapshot.next, Some(PieceKind::J));
        assert!(snapshot.playable());
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.drop_interval_ms, 1000);
        // L spawns at x=3: "..#" over "###".
        assert_eq!(snapshot.visible_cell(5, 0), Some(Color::Orange));
        assert_eq!(snapshot.visible_cell(3, 0), None);
    }
}
