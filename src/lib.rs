//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the engine, input and storage crates under one name and holds
//! the plain-text terminal view used by the default binary.

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_storage as storage;
pub use tui_2048_types as types;

pub mod term;
