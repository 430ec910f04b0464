//! Engine configuration and validation.
//!
//! All gameplay tunables live here so the engine itself stays free of magic
//! numbers. Construction fails fast on malformed values.

use thiserror::Error;

use crate::types::{
    BASE_TICK_MS, BOARD_COLS, BOARD_ROWS, CLEAR_DELAY_MS, COMBO_WINDOW_MS, FEEDBACK_TTL_MS,
    KICK_OFFSETS, LEVEL_SPEEDUP_MS, LINES_PER_LEVEL, MIN_TICK_MS, SOFT_DROP_TICK_MS,
};

/// Configuration rejected at engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive (got {rows}x{cols})")]
    BadDimensions { rows: usize, cols: usize },
    #[error("{name} must be greater than zero")]
    BadInterval { name: &'static str },
    #[error("rotation kick sequence must not be empty")]
    EmptyKicks,
}

/// Gameplay tunables.
///
/// Defaults reproduce the standard rules: 20x10 board, 500ms gravity that
/// speeds up 50ms per level down to a 100ms floor, 50ms soft drop, a 3s
/// combo window, and a 300ms clear flash.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Gravity interval at level 1.
    pub base_tick_ms: u32,
    /// Gravity interval while soft drop is held.
    pub soft_drop_tick_ms: u32,
    /// Gravity reduction per level above 1.
    pub level_speedup_ms: u32,
    /// Gravity floor.
    pub min_tick_ms: u32,
    /// Cumulative lines per level advance.
    pub lines_per_level: u32,
    /// Max age of the previous clear for a combo to continue.
    pub combo_window_ms: u64,
    /// Flash window between clear detection and commit.
    pub clear_delay_ms: u32,
    /// Lifetime of a score feedback message.
    pub feedback_ttl_ms: u64,
    /// Column offsets tried, in order, when a rotation collides in place.
    pub kick_offsets: Vec<i32>,
    /// Whether snapshots include the ghost piece (render hint only).
    pub ghost_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            base_tick_ms: BASE_TICK_MS,
            soft_drop_tick_ms: SOFT_DROP_TICK_MS,
            level_speedup_ms: LEVEL_SPEEDUP_MS,
            min_tick_ms: MIN_TICK_MS,
            lines_per_level: LINES_PER_LEVEL,
            combo_window_ms: COMBO_WINDOW_MS,
            clear_delay_ms: CLEAR_DELAY_MS,
            feedback_ttl_ms: FEEDBACK_TTL_MS,
            kick_offsets: KICK_OFFSETS.to_vec(),
            ghost_enabled: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::BadDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (name, value) in [
            ("base tick interval", self.base_tick_ms),
            ("soft drop interval", self.soft_drop_tick_ms),
            ("minimum tick interval", self.min_tick_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::BadInterval { name });
            }
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::BadInterval {
                name: "lines per level",
            });
        }
        if self.kick_offsets.is_empty() {
            return Err(ConfigError::EmptyKicks);
        }
        Ok(())
    }
}
