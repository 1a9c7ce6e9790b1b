//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the rules engine, the persistence layer and the terminal front end alike.
//!
//! # Board Dimensions
//!
//! The classic game is played on a 4x4 grid. The engine accepts any square size
//! between [`MIN_BOARD_SIZE`] and [`MAX_BOARD_SIZE`]; the size is fixed for the
//! lifetime of an engine instance.
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 4 | Rows and columns of the classic board |
//! | `DEFAULT_WIN_VALUE` | 2048 | Tile value that signals a win |
//! | `DEFAULT_HISTORY_LIMIT` | 10 | Maximum retained undo snapshots |
//! | `DEFAULT_FOUR_PROBABILITY` | 0.1 | Chance a spawned tile is a 4 |
//! | `INITIAL_TILES` | 2 | Tiles dealt by a fresh game |
//! | `REVIVE_REMOVE_COUNT` | 3 | Lowest tiles removed by a revive |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameCommand, Position};
//!
//! // Parse a direction (case-insensitive)
//! assert_eq!(Direction::from_str("Up"), Some(Direction::Up));
//! assert_eq!(Direction::from_str("sideways"), None);
//!
//! // Directions know which axis they slide along
//! assert!(Direction::Left.is_horizontal());
//! assert!(Direction::Down.is_reversed());
//!
//! // Commands wrap directions for the input layer
//! let cmd = GameCommand::from_str("left").unwrap();
//! assert_eq!(cmd, GameCommand::Move(Direction::Left));
//!
//! let p = Position::new(1, 2);
//! assert_eq!(p.manhattan(Position::new(3, 0)), 4);
//! ```

/// Rows and columns of the classic board
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest supported board size
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board size
pub const MAX_BOARD_SIZE: usize = 8;

/// Tile value that triggers the win signal
pub const DEFAULT_WIN_VALUE: u32 = 2048;

/// Maximum number of undo snapshots retained
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Probability that a spawned tile is a 4 instead of a 2
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Number of tiles placed by a fresh game
pub const INITIAL_TILES: usize = 2;

/// Number of lowest-valued tiles removed by a revive
pub const REVIVE_REMOVE_COUNT: usize = 3;

/// Largest tile a merge can produce
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Storage key of the per-game record
pub const GAME_STATE_KEY: &str = "gameState";

/// Storage key of the best score scalar
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Returns true for 0 (empty) and powers of two >= 2.
///
/// ```
/// use tui_2048_types::is_valid_tile_value;
///
/// assert!(is_valid_tile_value(0));
/// assert!(is_valid_tile_value(2048));
/// assert!(!is_valid_tile_value(1));
/// assert!(!is_valid_tile_value(6));
/// ```
pub fn is_valid_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Whether two tiles of `value` can merge without passing [`MAX_TILE_VALUE`].
pub fn can_merge(value: u32) -> bool {
    value != 0 && value <= MAX_TILE_VALUE / 2
}

/// Slide directions
///
/// Left and up read lines forward (toward index 0); right and down read them
/// reversed so that one "slide toward the front" primitive covers all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r"
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("left"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("R"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str(""), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Left and right slide along rows.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Right and down read their lines back to front.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Total Manhattan distance to another position.
    pub fn manhattan(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Player-facing commands
///
/// These are produced by the input layer and dispatched by the front end.
/// Only `Move` reaches the slide logic; the rest are maintenance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Roll back the last committed move
    Undo,
    /// Start a fresh game (best score survives)
    Restart,
    /// Keep playing after reaching the win tile
    Continue,
    /// Clear the lowest tiles after a game over
    Revive,
    /// Toggle tile-removal mode in the front end
    RemoveMode,
    /// Leave the game
    Quit,
}

impl GameCommand {
    /// Parse command from string
    ///
    /// Direction names parse into `Move`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameCommand};
    ///
    /// assert_eq!(GameCommand::from_str("undo"), Some(GameCommand::Undo));
    /// assert_eq!(GameCommand::from_str("down"), Some(GameCommand::Move(Direction::Down)));
    /// assert_eq!(GameCommand::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_str(s) {
            return Some(GameCommand::Move(direction));
        }
        match s.trim().to_lowercase().as_str() {
            "undo" => Some(GameCommand::Undo),
            "restart" | "new" => Some(GameCommand::Restart),
            "continue" => Some(GameCommand::Continue),
            "revive" => Some(GameCommand::Revive),
            "remove" => Some(GameCommand::RemoveMode),
            "quit" => Some(GameCommand::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Move(direction) => direction.as_str(),
            GameCommand::Undo => "undo",
            GameCommand::Restart => "restart",
            GameCommand::Continue => "continue",
            GameCommand::Revive => "revive",
            GameCommand::RemoveMode => "remove",
            GameCommand::Quit => "quit",
        }
    }
}
