//! The game engine: a pure, event-driven state machine.
//!
//! The engine owns all game state and is advanced exclusively through
//! [`Engine::apply`]. It never reads the clock and never sets timers: event
//! handlers take the host's monotonic `now_ms`, and anything the host must
//! schedule comes back as an [`Effect`]. This keeps every transition
//! deterministic and unit-testable.
//!
//! Lifecycle of a lock:
//!
//! 1. A downward move fails (gravity or hard drop) and the piece merges into
//!    a candidate board.
//! 2. No full rows: the merge commits immediately, the combo resets, the
//!    next piece spawns.
//! 3. Full rows: the merged board and row set are parked as a pending clear
//!    and `Effect::ScheduleClearCommit` asks the host to deliver
//!    [`Event::CommitClear`] after the flash delay. Scoring happens at the
//!    commit, not at detection. While the clear is pending there is no
//!    active piece, so movement and gravity events are inert.
//! 4. A spawn that collides ends the game (`Effect::Ended`); only
//!    [`Event::Restart`] is accepted afterwards.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::config::{ConfigError, EngineConfig};
use crate::core::generator::PieceGenerator;
use crate::core::piece::ActivePiece;
use crate::core::scoring::{
    advance_combo, clear_feedback, fall_interval_ms, level_advances, score_clear,
};
use crate::core::snapshot::{FeedbackView, Snapshot};
use crate::types::{DisplayCell, Event, PieceKind};

/// Host obligations produced by [`Engine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Arm a one-shot timer and deliver [`Event::CommitClear`] when it fires.
    ScheduleClearCommit { delay_ms: u32 },
    /// The game reached its terminal state; gravity ticks may stop.
    Ended,
}

/// At most one commit schedule and one end notice per event.
pub type Effects = ArrayVec<Effect, 2>;

/// A transient score feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Unique per message, so the renderer can restart its fade on change.
    pub id: u32,
    pub text: String,
    pub born_ms: u64,
}

/// Rows detected full, held between detection and deferred commit.
#[derive(Debug, Clone)]
struct PendingClear {
    merged: Board,
    rows: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    upcoming: PieceKind,
    generator: PieceGenerator,
    pending: Option<PendingClear>,
    game_over: bool,
    soft_dropping: bool,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    last_clear_ms: Option<u64>,
    feedback: Option<Feedback>,
    feedback_seq: u32,
}

impl Engine {
    /// Build an engine, validating the configuration first.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut generator = PieceGenerator::new(seed);
        let first = generator.next();
        let upcoming = generator.next();
        Ok(Self {
            board: Board::new(config.rows, config.cols),
            active: Some(ActivePiece::spawn(first, config.cols)),
            upcoming,
            generator,
            pending: None,
            game_over: false,
            soft_dropping: false,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            last_clear_ms: None,
            feedback: None,
            feedback_seq: 0,
            config,
        })
    }

    /// Advance the engine by one event.
    ///
    /// `now_ms` is the host's monotonic clock; it anchors the combo window
    /// and feedback lifetimes. Illegal moves are silent no-ops.
    pub fn apply(&mut self, event: Event, now_ms: u64) -> Effects {
        let mut effects = Effects::new();
        if self.game_over {
            if event == Event::Restart {
                self.restart();
            }
            return effects;
        }
        match event {
            Event::MoveLeft => {
                self.shift(0, -1);
            }
            Event::MoveRight => {
                self.shift(0, 1);
            }
            Event::Rotate => {
                self.rotate();
            }
            Event::SoftDropStart => self.soft_dropping = true,
            Event::SoftDropStop => self.soft_dropping = false,
            Event::Tick => self.step_down(&mut effects),
            Event::HardDrop => self.hard_drop(&mut effects),
            Event::CommitClear => self.commit_clear(now_ms, &mut effects),
            Event::Restart => self.restart(),
        }
        effects
    }

    /// Gravity interval for the host timer, given level and soft drop.
    pub fn tick_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            self.config.soft_drop_tick_ms
        } else {
            fall_interval_ms(
                self.config.base_tick_ms,
                self.config.level_speedup_ms,
                self.config.min_tick_ms,
                self.level,
            )
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn upcoming(&self) -> PieceKind {
        self.upcoming
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Rows flagged for removal while a clear is pending.
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.pending {
            Some(p) => &p.rows,
            None => &[],
        }
    }

    /// The current feedback message, if one has been emitted.
    ///
    /// Snapshots apply the TTL; this accessor returns it regardless of age.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Landing row of the active piece (ghost position), if one is falling.
    pub fn ghost_row(&self) -> Option<i32> {
        self.active.map(|p| p.drop_row(&self.board))
    }

    /// Build the render snapshot for the host's current clock.
    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        let base = self.pending.as_ref().map_or(&self.board, |p| &p.merged);
        let cols = self.config.cols;
        let mut grid: Vec<DisplayCell> = base
            .cells()
            .iter()
            .map(|cell| match cell {
                Some(kind) => DisplayCell::Filled(*kind),
                None => DisplayCell::Empty,
            })
            .collect();

        if let Some(active) = self.active {
            if self.config.ghost_enabled {
                let ghost = ActivePiece {
                    row: active.drop_row(&self.board),
                    ..active
                };
                for (r, c) in ghost.cells() {
                    if base.is_inside(r, c) {
                        let i = r as usize * cols + c as usize;
                        if grid[i] == DisplayCell::Empty {
                            grid[i] = DisplayCell::Ghost(active.kind);
                        }
                    }
                }
            }
            for (r, c) in active.cells() {
                if base.is_inside(r, c) {
                    grid[r as usize * cols + c as usize] = DisplayCell::Filled(active.kind);
                }
            }
        }

        let feedback = self
            .feedback
            .as_ref()
            .filter(|f| now_ms.saturating_sub(f.born_ms) < self.config.feedback_ttl_ms)
            .map(|f| FeedbackView {
                id: f.id,
                text: f.text.clone(),
            });

        Snapshot {
            rows: self.config.rows,
            cols,
            grid,
            score: self.score,
            level: self.level,
            lines: self.lines,
            combo: self.combo,
            upcoming: self.upcoming,
            clearing_rows: self.clearing_rows().to_vec(),
            feedback,
            game_over: self.game_over,
        }
    }

    fn shift(&mut self, d_row: i32, d_col: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.offset(d_row, d_col);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            true
        } else {
            false
        }
    }

    /// Rotate clockwise, trying in place first and then each configured
    /// column kick. The first legal candidate wins; otherwise nothing moves.
    fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotated();
        if rotated.fits(&self.board) {
            self.active = Some(rotated);
            return true;
        }
        for i in 0..self.config.kick_offsets.len() {
            let kicked = rotated.offset(0, self.config.kick_offsets[i]);
            if kicked.fits(&self.board) {
                self.active = Some(kicked);
                return true;
            }
        }
        false
    }

    /// Gravity step: fall one row, or lock when the floor or stack is hit.
    fn step_down(&mut self, effects: &mut Effects) {
        let Some(active) = self.active else {
            return;
        };
        let moved = active.offset(1, 0);
        if moved.fits(&self.board) {
            self.active = Some(moved);
        } else {
            self.lock(effects);
        }
    }

    fn hard_drop(&mut self, effects: &mut Effects) {
        let Some(active) = self.active else {
            return;
        };
        let landed = ActivePiece {
            row: active.drop_row(&self.board),
            ..active
        };
        self.active = Some(landed);
        self.lock(effects);
    }

    fn lock(&mut self, effects: &mut Effects) {
        let Some(active) = self.active.take() else {
            return;
        };
        let merged = self.board.merged(&active.cells(), active.kind);
        let rows = merged.full_rows();
        if rows.is_empty() {
            self.combo = 0;
            self.board = merged;
            self.spawn(effects);
        } else {
            let delay_ms = self.config.clear_delay_ms;
            self.pending = Some(PendingClear { merged, rows });
            effects.push(Effect::ScheduleClearCommit { delay_ms });
        }
    }

    /// Deferred commit: remove the flagged rows, award points, spawn.
    fn commit_clear(&mut self, now_ms: u64, effects: &mut Effects) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let cleared = pending.rows.len();
        let board = pending.merged.without_rows(&pending.rows);

        let combo = advance_combo(
            self.combo,
            self.last_clear_ms,
            now_ms,
            self.config.combo_window_ms,
        );
        let perfect = board.is_empty();
        let score = score_clear(cleared, combo, perfect);

        self.board = board;
        self.score = self.score.saturating_add(score.total);
        self.combo = combo;
        self.last_clear_ms = Some(now_ms);
        self.lines = self.lines.saturating_add(cleared as u32);
        if level_advances(self.level, self.lines, self.config.lines_per_level) {
            self.level += 1;
        }
        if let Some(text) = clear_feedback(cleared, combo, perfect) {
            self.feedback_seq += 1;
            self.feedback = Some(Feedback {
                id: self.feedback_seq,
                text,
                born_ms: now_ms,
            });
        }
        self.spawn(effects);
    }

    /// Promote the upcoming piece to active and draw a new lookahead.
    ///
    /// A spawn position that already collides is the terminal condition.
    fn spawn(&mut self, effects: &mut Effects) {
        let piece = ActivePiece::spawn(self.upcoming, self.config.cols);
        self.upcoming = self.generator.next();
        if piece.fits(&self.board) {
            self.active = Some(piece);
        } else {
            self.game_over = true;
            effects.push(Effect::Ended);
        }
    }

    fn restart(&mut self) {
        let first = self.generator.next();
        self.board = Board::new(self.config.rows, self.config.cols);
        self.active = Some(ActivePiece::spawn(first, self.config.cols));
        self.upcoming = self.generator.next();
        self.pending = None;
        self.game_over = false;
        self.soft_dropping = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.last_clear_ms = None;
        self.feedback = None;
    }
}
