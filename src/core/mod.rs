//! Core game engine - pure, deterministic, and testable.
//!
//! This module contains all the game rules and state transitions. It has
//! zero dependencies on UI, timers, or I/O:
//!
//! - [`board`]: the committed cell grid with merge and row-clear operations
//! - [`piece`]: shape matrix templates, computed rotation, the active piece
//! - [`generator`]: seeded uniform random piece generation
//! - [`engine`]: the event-driven state machine tying it all together
//! - [`scoring`]: clear points, combo chains, level curve
//! - [`snapshot`]: the pull-based render view
//! - [`config`]: tunables and fail-fast validation
//!
//! The host advances the engine by delivering [`crate::types::Event`]s and
//! honoring the returned [`engine::Effect`]s; nothing in here blocks or
//! reads the clock.

pub mod board;
pub mod config;
pub mod engine;
pub mod generator;
pub mod piece;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use engine::{Effect, Effects, Engine};
pub use generator::PieceGenerator;
pub use piece::{ActivePiece, ShapeMatrix};
pub use snapshot::{FeedbackView, Snapshot};
