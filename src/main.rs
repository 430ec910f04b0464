//! Terminal gridfall runner.
//!
//! One persistent event loop hosts the engine: it owns the gravity timer and
//! the clear-commit one-shot, polls the keyboard, and renders a snapshot
//! every frame. The engine itself never sees a timer or the terminal.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};

use gridfall::core::{Effect, Engine, EngineConfig};
use gridfall::input::{map_press, should_quit, SoftDropKey};
use gridfall::term::{GameView, TerminalRenderer, Viewport};
use gridfall::types::Event;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut engine = Engine::new(EngineConfig::default(), seed)?;

    let view = GameView::default();
    let mut soft_drop = SoftDropKey::new();

    let clock = Instant::now();
    let mut next_tick = Instant::now() + tick_duration(&engine);
    let mut commit_at: Option<Instant> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snapshot = engine.snapshot(clock.elapsed().as_millis() as u64);
        term.draw(&view.render(&snapshot, Viewport::new(w, h)))?;

        // Sleep until the nearest deadline: gravity tick or pending commit.
        let deadline = match commit_at {
            Some(at) => next_tick.min(at),
            None => next_tick,
        };
        let timeout = deadline.saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        let mapped = soft_drop.press(key.code).or_else(|| map_press(key.code));
                        if let Some(ev) = mapped {
                            // Terminal auto-repeat may only move the piece;
                            // drops, rotation, and restart need fresh presses.
                            let repeat_ok =
                                matches!(ev, Event::MoveLeft | Event::MoveRight);
                            if key.kind == KeyEventKind::Press || repeat_ok {
                                let now = clock.elapsed().as_millis() as u64;
                                let effects = engine.apply(ev, now);
                                handle_effects(&effects, &mut commit_at);
                                if matches!(ev, Event::SoftDropStart | Event::Restart) {
                                    next_tick = Instant::now() + tick_duration(&engine);
                                }
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(ev) = soft_drop.release(key.code) {
                            engine.apply(ev, clock.elapsed().as_millis() as u64);
                            next_tick = Instant::now() + tick_duration(&engine);
                        }
                    }
                },
                TermEvent::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Terminals without key-release events: time out the held soft drop.
        if let Some(ev) = soft_drop.poll() {
            engine.apply(ev, clock.elapsed().as_millis() as u64);
            next_tick = Instant::now() + tick_duration(&engine);
        }

        if commit_at.is_some_and(|at| Instant::now() >= at) {
            commit_at = None;
            let now = clock.elapsed().as_millis() as u64;
            let effects = engine.apply(Event::CommitClear, now);
            handle_effects(&effects, &mut commit_at);
        }

        if Instant::now() >= next_tick {
            let now = clock.elapsed().as_millis() as u64;
            let effects = engine.apply(Event::Tick, now);
            handle_effects(&effects, &mut commit_at);
            next_tick = Instant::now() + tick_duration(&engine);
        }
    }
}

fn tick_duration(engine: &Engine) -> Duration {
    Duration::from_millis(engine.tick_interval_ms() as u64)
}

fn handle_effects(effects: &[Effect], commit_at: &mut Option<Instant>) {
    for effect in effects {
        match effect {
            Effect::ScheduleClearCommit { delay_ms } => {
                *commit_at = Some(Instant::now() + Duration::from_millis(*delay_ms as u64));
            }
            // The engine goes inert on its own; keep rendering so the
            // overlay stays up until restart or quit.
            Effect::Ended => {}
        }
    }
}
