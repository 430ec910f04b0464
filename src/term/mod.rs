//! Terminal rendering layer.
//!
//! Renders engine snapshots into a plain framebuffer ([`fb`], [`game_view`])
//! and flushes it with diff redraws ([`renderer`]). Only `renderer` touches
//! the terminal; everything else is pure and testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, FrameBuffer, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
