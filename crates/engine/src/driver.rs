//! Per-frame game driver.
//!
//! Commands arriving between frames are queued FIFO. Each frame applies every queued
//! command, then advances gravity, then hands the events produced during the frame to
//! the registered listeners in emission order.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info};

use blockfall_core::{DropOutcome, GameSnapshot, GameState, RandomSource, SimpleRng};
use blockfall_types::{Command, GameEvent};

use crate::frame::{FrameControl, FrameScheduler};

type Listener = Box<dyn FnMut(&GameEvent)>;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Commands taken from the queue
    pub commands: usize,
    /// Commands that changed the game
    pub applied: usize,
    pub drop: DropOutcome,
    pub events: usize,
}

/// Totals for a full scheduler run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub commands: u64,
    pub events: u64,
    pub game_over: bool,
}

pub struct GameDriver<R = SimpleRng> {
    game: GameState<R>,
    queue: VecDeque<Command>,
    listeners: Vec<Listener>,
    scratch: Vec<GameEvent>,
}

impl<R: RandomSource> GameDriver<R> {
    pub fn new(game: GameState<R>) -> Self {
        Self {
            game,
            queue: VecDeque::new(),
            listeners: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState<R> {
        &mut self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Queue a command for the next frame.
    pub fn push_command(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Register a callback for every event, in emission order.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run one frame: queued commands, then gravity, then event dispatch.
    pub fn frame(&mut self, elapsed_ms: u32) -> FrameReport {
        let commands = self.queue.len();
        let mut applied = 0;
        while let Some(command) = self.queue.pop_front() {
            if self.game.apply(command) {
                applied += 1;
            }
        }

        let drop = self.game.tick(elapsed_ms);

        self.scratch.clear();
        self.scratch.extend(self.game.drain_events());
        for event in &self.scratch {
            debug!("event: {:?}", event);
            for listener in &mut self.listeners {
                listener(event);
            }
        }

        FrameReport {
            commands,
            applied,
            drop,
            events: self.scratch.len(),
        }
    }

    /// Drive frames from `scheduler` until it finishes or the game ends.
    ///
    /// `input` is asked once per frame, before the frame runs, for a command to queue.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut input: F) -> RunSummary
    where
        S: FrameScheduler + ?Sized,
        F: FnMut(u64) -> Option<Command>,
    {
        let mut summary = RunSummary::default();

        let frames = scheduler.run(&mut |elapsed_ms| {
            if let Some(command) = input(summary.frames) {
                self.push_command(command);
            }
            summary.frames += 1;

            let report = self.frame(elapsed_ms);
            summary.commands += report.commands as u64;
            summary.events += report.events as u64;

            if self.game.game_over() {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        });

        summary.frames = frames;
        summary.game_over = self.game.game_over();
        info!(
            "run finished after {} frame(s): score {}, lines {}, level {}",
            summary.frames,
            self.game.score(),
            self.game.lines(),
            self.game.level()
        );
        summary
    }
}

impl<R: fmt::Debug> fmt::Debug for GameDriver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDriver")
            .field("game", &self.game)
            .field("queue", &self.queue)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
