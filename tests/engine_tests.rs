//! Engine behavior through the public event API.

use gridfall::core::{ConfigError, Engine, EngineConfig};
use gridfall::types::{DisplayCell, Event};

fn engine() -> Engine {
    Engine::new(EngineConfig::default(), 42).unwrap()
}

fn occupied(engine: &Engine) -> usize {
    engine.board().cells().iter().filter(|c| c.is_some()).count()
}

#[test]
fn construction_validates_config() {
    let bad = EngineConfig {
        cols: 0,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::new(bad, 1),
        Err(ConfigError::BadDimensions { .. })
    ));

    let bad = EngineConfig {
        kick_offsets: Vec::new(),
        ..EngineConfig::default()
    };
    assert_eq!(Engine::new(bad, 1).unwrap_err(), ConfigError::EmptyKicks);
}

#[test]
fn gravity_locks_the_first_piece_within_the_board_height() {
    let mut engine = engine();
    assert_eq!(occupied(&engine), 0);
    for _ in 0..25 {
        engine.apply(Event::Tick, 0);
    }
    // The first piece locked (4 cells); the second is still falling.
    assert_eq!(occupied(&engine), 4);
    assert!(!engine.game_over());
}

#[test]
fn hard_drops_stack_without_overlap() {
    let mut engine = engine();
    for _ in 0..3 {
        engine.apply(Event::HardDrop, 0);
    }
    // Spawn-centered pieces cannot complete a 10-wide row, so nothing
    // cleared and every locked cell is distinct.
    assert_eq!(occupied(&engine), 12);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.combo(), 0);
}

#[test]
fn moves_never_corrupt_the_board() {
    let mut engine = engine();
    for _ in 0..50 {
        engine.apply(Event::MoveLeft, 0);
        engine.apply(Event::Rotate, 0);
        engine.apply(Event::MoveRight, 0);
        engine.apply(Event::Tick, 0);
    }
    let snap = engine.snapshot(0);
    assert_eq!(snap.grid.len(), 200);
    assert!(!snap.game_over);
}

#[test]
fn same_seed_and_events_replay_identically() {
    let mut a = Engine::new(EngineConfig::default(), 777).unwrap();
    let mut b = Engine::new(EngineConfig::default(), 777).unwrap();
    let script = [
        Event::MoveLeft,
        Event::Rotate,
        Event::Tick,
        Event::HardDrop,
        Event::MoveRight,
        Event::Tick,
        Event::HardDrop,
    ];
    for (i, &event) in script.iter().cycle().take(70).enumerate() {
        a.apply(event, i as u64 * 100);
        b.apply(event, i as u64 * 100);
        assert_eq!(a.snapshot(i as u64 * 100), b.snapshot(i as u64 * 100));
    }
}

#[test]
fn soft_drop_toggles_the_gravity_interval() {
    let mut engine = engine();
    let normal = engine.tick_interval_ms();
    assert_eq!(normal, 500);

    engine.apply(Event::SoftDropStart, 0);
    assert_eq!(engine.tick_interval_ms(), 50);
    engine.apply(Event::SoftDropStop, 0);
    assert_eq!(engine.tick_interval_ms(), normal);
}

#[test]
fn restart_resets_counters_and_board() {
    let mut engine = engine();
    for _ in 0..5 {
        engine.apply(Event::HardDrop, 0);
    }
    assert!(occupied(&engine) > 0);

    engine.apply(Event::Restart, 0);
    assert_eq!(occupied(&engine), 0);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.level(), 1);
    assert!(!engine.game_over());
    assert!(engine.active().is_some());
}

#[test]
fn snapshot_contains_a_ghost_below_the_active_piece() {
    let engine = engine();
    let snap = engine.snapshot(0);

    let active_rows: Vec<usize> = (0..20)
        .filter(|&r| (0..10).any(|c| matches!(snap.cell(r, c), DisplayCell::Filled(_))))
        .collect();
    let ghost_rows: Vec<usize> = (0..20)
        .filter(|&r| (0..10).any(|c| matches!(snap.cell(r, c), DisplayCell::Ghost(_))))
        .collect();

    assert!(!active_rows.is_empty());
    assert!(!ghost_rows.is_empty());
    assert!(
        ghost_rows.iter().min() > active_rows.iter().max(),
        "ghost renders below the falling piece on an empty board"
    );
}

#[test]
fn disabling_the_ghost_removes_it_from_snapshots() {
    let config = EngineConfig {
        ghost_enabled: false,
        ..EngineConfig::default()
    };
    let engine = Engine::new(config, 42).unwrap();
    let snap = engine.snapshot(0);
    assert!(snap.grid.iter().all(|c| !matches!(c, DisplayCell::Ghost(_))));
}

#[test]
fn endless_gravity_eventually_ends_the_game() {
    let mut engine = engine();
    // Hard-dropping forever must terminate in a game over, and stay inert
    // afterwards instead of overwriting the stack.
    for _ in 0..200 {
        engine.apply(Event::HardDrop, 0);
        if engine.game_over() {
            break;
        }
    }
    assert!(engine.game_over());
    let frozen = occupied(&engine);
    engine.apply(Event::HardDrop, 0);
    engine.apply(Event::Tick, 0);
    assert_eq!(occupied(&engine), frozen);
    assert!(engine.snapshot(0).game_over);
}
