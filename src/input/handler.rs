//! Keyboard mapping and soft-drop hold tracking.
//!
//! The engine consumes discrete `SoftDropStart`/`SoftDropStop` events, but
//! many terminals never emit key-release events. [`SoftDropKey`] bridges the
//! gap: holding Down keeps refreshing the press timestamp, and a quiet
//! period releases the soft drop automatically.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Event;

// Long enough to survive the gap between terminal auto-repeat presses,
// short enough that letting go actually ends the soft drop.
const RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Map a key press to an engine event. Soft drop is handled separately.
pub fn map_press(code: KeyCode) -> Option<Event> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Event::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Event::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Event::Rotate),
        KeyCode::Char(' ') => Some(Event::HardDrop),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Event::Restart),
        _ => None,
    }
}

/// Quit on `q`, Escape, or Ctrl+C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Tracks the held state of the soft-drop key.
#[derive(Debug, Clone)]
pub struct SoftDropKey {
    held: bool,
    last_press: Instant,
    release_timeout: Duration,
}

impl SoftDropKey {
    pub fn new() -> Self {
        Self {
            held: false,
            last_press: Instant::now(),
            release_timeout: RELEASE_TIMEOUT,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Key went down (or auto-repeated). Emits `SoftDropStart` on the first
    /// press only; repeats just refresh the hold.
    pub fn press(&mut self, code: KeyCode) -> Option<Event> {
        if !is_soft_drop_key(code) {
            return None;
        }
        self.last_press = Instant::now();
        if self.held {
            None
        } else {
            self.held = true;
            Some(Event::SoftDropStart)
        }
    }

    /// Explicit release event from terminals that deliver them.
    pub fn release(&mut self, code: KeyCode) -> Option<Event> {
        if is_soft_drop_key(code) && self.held {
            self.held = false;
            Some(Event::SoftDropStop)
        } else {
            None
        }
    }

    /// Call once per host loop iteration: releases the hold when no press
    /// (or auto-repeat) arrived within the timeout.
    pub fn poll(&mut self) -> Option<Event> {
        if self.held && self.last_press.elapsed() > self.release_timeout {
            self.held = false;
            Some(Event::SoftDropStop)
        } else {
            None
        }
    }
}

impl Default for SoftDropKey {
    fn default() -> Self {
        Self::new()
    }
}
