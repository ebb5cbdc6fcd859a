//! The simulation session and its two-phase controller.
//!
//! A session starts in [`Phase::Drawing`], where pointer input paints cells
//! directly, and toggles to [`Phase::Playing`] on the start key, where the
//! board evolves on the configured cadence. One call to
//! [`SimulationSession::tick`] is one pass of the host loop.

use std::time::Duration;

use bevy::{
    log::{debug, info, warn},
    prelude::Resource,
};

use crate::{
    board::{Board, CellCoord},
    config::SimulationConfig,
    rules,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Drawing,
    Playing,
}

impl Phase {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Phase::Drawing => Phase::Playing,
            Phase::Playing => Phase::Drawing,
        }
    }
}

/// When a generation advance is due while playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CadenceStrategy {
    /// one generation per host frame
    PerFrame,
    /// one generation whenever the configured interval has elapsed
    #[default]
    WallClock,
}

/// Generation pacing: a strategy plus the time of the last advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    strategy: CadenceStrategy,
    interval: Duration,
    last_advance: Duration,
}

impl Cadence {
    /// `generations_per_second` is truncated to whole milliseconds per
    /// generation, so rates above 1000 advance on every tick.
    pub fn new(strategy: CadenceStrategy, generations_per_second: u32) -> Self {
        let millis = 1000 / u64::from(generations_per_second.max(1));
        Self {
            strategy,
            interval: Duration::from_millis(millis),
            last_advance: Duration::ZERO,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Non-blocking check against `now`, the host clock's elapsed time.
    pub fn is_due(&self, now: Duration) -> bool {
        match self.strategy {
            CadenceStrategy::PerFrame => true,
            CadenceStrategy::WallClock => now.saturating_sub(self.last_advance) >= self.interval,
        }
    }

    #[inline]
    pub fn mark(&mut self, now: Duration) {
        self.last_advance = now;
    }
}

/// Input sampled once per tick by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// primary (paint) button held
    pub primary_held: bool,
    /// secondary (erase) button held
    pub secondary_held: bool,
    /// cell under the pointer, `None` when the pointer is outside the board
    pub pointer: Option<CellCoord>,
    /// start/stop key went down this tick
    pub start_pressed: bool,
    /// reset key went down this tick
    pub reset_pressed: bool,
    /// randomize key went down this tick
    pub randomize_pressed: bool,
}

/// What a tick did, so hosts can skip redraws when nothing changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub board_changed: bool,
    pub phase_changed: bool,
    /// a generation was computed
    pub advanced: bool,
}

/// All mutable simulation state. Nothing lives outside of it, so separate
/// sessions never interfere.
#[derive(Resource, Debug, Clone)]
pub struct SimulationSession {
    board: Board,
    /// second buffer for double-buffered generation steps
    scratch: Board,
    phase: Phase,
    generation: u64,
    cadence: Cadence,
    rng: fastrand::Rng,
}

impl SimulationSession {
    pub fn new(rows: usize, columns: usize, cadence: Cadence) -> Self {
        Self {
            board: Board::new(rows, columns),
            scratch: Board::new(rows, columns),
            phase: Phase::Drawing,
            generation: 0,
            cadence,
            rng: fastrand::Rng::new(),
        }
    }

    /// Builds a session from a validated config.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let cadence = Cadence::new(config.cadence, config.simulation_speed);
        let mut session = Self::new(config.rows, config.columns, cadence);
        if let Some(seed) = config.seed {
            session.rng = fastrand::Rng::with_seed(seed);
        }
        session
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// generations computed since start or the last reset
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Runs one tick of the controller. `now` is the host clock's elapsed time.
    pub fn tick(&mut self, input: &TickInput, now: Duration) -> TickOutcome {
        match self.phase {
            Phase::Drawing => self.drawing_tick(input),
            Phase::Playing => self.playing_tick(input, now),
        }
    }

    fn drawing_tick(&mut self, input: &TickInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // paint first, erase second: with both buttons held the cell ends dead
        if let Some(coord) = input.pointer {
            if input.primary_held {
                outcome.board_changed |= self.paint(coord, true);
            }
            if input.secondary_held {
                outcome.board_changed |= self.paint(coord, false);
            }
        }

        if input.start_pressed {
            self.phase = self.phase.toggled();
            outcome.phase_changed = true;
            info!("Playing phase");
        } else if input.reset_pressed {
            info!("Resetting board");
            self.reset();
            outcome.board_changed = true;
        } else if input.randomize_pressed {
            info!("Randomizing board");
            self.board.randomize(&mut self.rng);
            self.generation = 0;
            outcome.board_changed = true;
        }

        outcome
    }

    fn playing_tick(&mut self, input: &TickInput, now: Duration) -> TickOutcome {
        if input.start_pressed {
            self.phase = self.phase.toggled();
            info!("Drawing phase");
            return TickOutcome {
                phase_changed: true,
                ..Default::default()
            };
        }

        if !self.cadence.is_due(now) {
            return TickOutcome::default();
        }

        self.advance();
        self.cadence.mark(now);
        TickOutcome {
            board_changed: true,
            advanced: true,
            ..Default::default()
        }
    }

    /// Replaces the board with its next generation, reusing the scratch buffer.
    pub fn advance(&mut self) {
        rules::step_into(&self.board, &mut self.scratch);
        std::mem::swap(&mut self.board, &mut self.scratch);
        self.generation += 1;
        debug!(
            "generation {} population {}",
            self.generation,
            self.board.population()
        );
    }

    /// Kills every cell and zeroes the generation counter.
    pub fn reset(&mut self) {
        self.board.reset();
        self.generation = 0;
    }

    /// Writes one cell; returns whether its state changed.
    fn paint(&mut self, coord: CellCoord, alive: bool) -> bool {
        match self.board.get(coord.row, coord.column) {
            Ok(current) if current == alive => false,
            Ok(_) => self.board.set(coord.row, coord.column, alive).is_ok(),
            Err(err) => {
                warn!("dropping pointer write: {err}");
                false
            }
        }
    }
}
