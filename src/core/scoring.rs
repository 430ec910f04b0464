//! Scoring rules: base clear points, combo chains, perfect clears, level
//! progression, and the gravity curve.
//!
//! All functions are pure; the engine feeds in counters and timestamps and
//! applies the results.

use crate::types::{COMBO_STEP, LINE_SCORES, PERFECT_CLEAR_BONUS};

/// Breakdown of the points awarded at a clear commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    pub base: u32,
    pub combo_bonus: u32,
    pub perfect_bonus: u32,
    pub total: u32,
}

/// Base points for clearing `lines` rows in one lock.
///
/// More than 4 cannot happen with a single tetromino, but the defensive arm
/// keeps the function total.
pub fn base_points(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1..=4 => LINE_SCORES[lines],
        n => 100 * n as u32,
    }
}

/// Combo bonus: nothing for the first clear of a chain, `combo * 50` after.
pub fn combo_bonus(combo: u32) -> u32 {
    if combo > 1 {
        combo * COMBO_STEP
    } else {
        0
    }
}

/// The combo counter after a clear at `now_ms`.
///
/// Extends the chain when the previous clear happened within `window_ms`,
/// otherwise starts a new chain at 1.
pub fn advance_combo(prev: u32, last_clear_ms: Option<u64>, now_ms: u64, window_ms: u64) -> u32 {
    match last_clear_ms {
        Some(last) if now_ms.saturating_sub(last) < window_ms => prev + 1,
        _ => 1,
    }
}

/// Total points for a commit clearing `lines` rows at combo index `combo`.
pub fn score_clear(lines: usize, combo: u32, perfect: bool) -> ClearScore {
    let base = base_points(lines);
    let combo_bonus = combo_bonus(combo);
    let perfect_bonus = if perfect { PERFECT_CLEAR_BONUS } else { 0 };
    ClearScore {
        base,
        combo_bonus,
        perfect_bonus,
        total: base
            .saturating_add(combo_bonus)
            .saturating_add(perfect_bonus),
    }
}

/// Whether `total_lines` crosses the threshold for the next level.
///
/// Checked once per commit, so the level advances at most one step even if a
/// multi-row clear jumps past the threshold.
pub fn level_advances(level: u32, total_lines: u32, lines_per_level: u32) -> bool {
    total_lines >= level.saturating_mul(lines_per_level)
}

/// Gravity interval for a level: `base - (level-1)*step`, floored.
pub fn fall_interval_ms(base_ms: u32, step_ms: u32, floor_ms: u32, level: u32) -> u32 {
    base_ms
        .saturating_sub(level.saturating_sub(1).saturating_mul(step_ms))
        .max(floor_ms)
}

/// Feedback text for a clear, by priority: perfect clear, then a four-row
/// clear, then a running combo or multi-row clear. Single clears with no
/// chain get nothing.
pub fn clear_feedback(lines: usize, combo: u32, perfect: bool) -> Option<String> {
    if perfect {
        Some("PERFECT CLEAR".to_string())
    } else if lines >= 4 {
        Some("TETRIS".to_string())
    } else if combo > 1 {
        Some(format!("COMBO x{combo}"))
    } else if lines == 3 {
        Some("TRIPLE".to_string())
    } else if lines == 2 {
        Some("DOUBLE".to_string())
    } else {
        None
    }
}
