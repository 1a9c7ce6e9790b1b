//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]. Arrow keys,
//! WASD and HJKL all slide; single letters drive the maintenance commands.

pub mod map;

pub use tui_2048_types as types;

pub use map::{coordinate_from_key, handle_key_event};
