//! Engine helpers that sit between a host and the core.
//!
//! Nothing here changes a game on its own. Pointer drags and the keyboard
//! cursor only ever propose a `(slot, row, col)` candidate; the core's
//! placement check remains the sole judge of legality.

pub mod cursor;
pub mod drag;
pub mod resolver;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use cursor::Cursor;
pub use drag::{DragSession, Preview};
pub use resolver::{clamp_anchor, pointer_to_cell, GridGeometry, PointerPos};
