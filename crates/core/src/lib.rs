//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the 2048 sliding-tile puzzle. It has no
//! dependency on the terminal, on input handling, or on where saved games end
//! up; persistence is reached through the [`BestScoreStore`] port and the
//! [`codec`] record.
//!
//! # Module Structure
//!
//! - [`board`]: NxN grid of tile values with row/column line access
//! - [`line`]: slide-and-merge of a single line, with per-slot provenance
//! - [`game_state`]: [`GridEngine`], the move/undo/revive state machine
//! - [`mapper`]: which old tile became which new tile, for animation
//! - [`history`]: bounded undo stack of [`Snapshot`]s
//! - [`rng`]: tile spawning behind the [`TileSource`] trait
//! - [`codec`]: persisted game record and its validation
//! - [`config`]: engine settings, overridable from the environment
//! - [`best`]: best-score persistence port
//!
//! # Rules
//!
//! - A move slides every tile toward one edge; equal neighbours merge once
//! - Each merge adds the merged value to the score
//! - A move that changes the board spawns one tile (2, or 4 one time in ten)
//! - Reaching the win tile (2048 by default) is signalled once per game
//! - The game is over when no empty cell and no equal neighbours remain
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GridEngine;
//! use tui_2048_types::Direction;
//!
//! let mut game = GridEngine::new(12345);
//! assert_eq!(game.board().occupied_count(), 2);
//!
//! let result = game.move_in(Direction::Left);
//! if result.moved {
//!     // One tile spawned after the slide
//!     assert!(result.new_tile.is_some());
//!     assert!(game.undo());
//! }
//! ```

pub mod best;
pub mod board;
pub mod codec;
pub mod config;
pub mod game_state;
pub mod history;
pub mod line;
pub mod mapper;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use best::{BestScoreStore, MemoryBestScore, NullBestScore, StoreError};
pub use board::Board;
pub use codec::{CodecError, DecodedGame, RawSavedGame, SavedGame};
pub use config::{EngineConfig, MappingMode};
pub use game_state::{GridEngine, MoveResult};
pub use history::UndoHistory;
pub use line::{line_can_slide, merged_pairs, reduce_line, LineReduction, SlotSource};
pub use mapper::{is_consistent, map_move, MoveMapping, TileMerge, TileMove};
pub use rng::{spawn_random_tile, ScriptedTileSource, SeededTileSource, SpawnedTile, TileSource};
pub use snapshot::{Snapshot, SnapshotRecord};
