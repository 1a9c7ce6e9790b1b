//! Persistence for saved games and the best score
//!
//! Everything is stored as JSON values in a [`KeyValueStore`]: the game record
//! under `gameState` and the best score under `bestScore`. Storage failures
//! are logged here and never reach the player; the engine falls back to a
//! fresh game instead.

pub mod best;
pub mod config;
pub mod session;
pub mod store;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use best::StoredBestScore;
pub use config::StorageConfig;
pub use session::Session;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
