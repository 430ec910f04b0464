//! Keyboard input mapping for the terminal host.

pub mod handler;

pub use handler::{map_press, should_quit, SoftDropKey};
