//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and left
//! button mouse events into drag gestures. Independent of any UI framework.

pub mod map;
pub mod mouse;

pub use block_blast_types as types;

pub use map::{handle_key_event, should_quit};
pub use mouse::{handle_mouse_event, Gesture};
