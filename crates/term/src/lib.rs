//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget toolkits and renders into a framebuffer that is diffed and flushed
//! to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - One layout for both drawing and mouse hit testing
//! - Precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use block_blast_core as core;
pub use block_blast_engine as engine;
pub use block_blast_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use flash::FlashTimer;
pub use game_view::{Decorations, GameView, Layout, Rect, Viewport};
pub use renderer::{encode_frame, install_panic_hook, restore_terminal, TerminalRenderer};
