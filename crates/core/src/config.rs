//! Engine configuration
//!
//! Defaults reproduce the classic game. `from_env` lets the binary override
//! them without code changes:
//!
//! - `T2048_SIZE`: board size (2-8, default 4)
//! - `T2048_WIN_VALUE`: win tile, must be a power of two (default 2048)
//! - `T2048_HISTORY`: undo depth (default 10)
//! - `T2048_FOUR_PROBABILITY`: chance of spawning a 4 (default 0.1)
//! - `T2048_MAPPING`: `provenance` (default) or `diff`
//!
//! Unset or unparsable values fall back to the default.

use crate::types::{
    is_valid_tile_value, DEFAULT_BOARD_SIZE, DEFAULT_FOUR_PROBABILITY, DEFAULT_HISTORY_LIMIT,
    DEFAULT_WIN_VALUE, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

/// How the engine builds the per-move mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingMode {
    /// Re-index the reducer's own provenance (exact)
    #[default]
    Provenance,
    /// Reconstruct from the before/after boards with [`crate::map_move`]
    Diff,
}

impl MappingMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "provenance" | "exact" => Some(MappingMode::Provenance),
            "diff" => Some(MappingMode::Diff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub size: usize,
    pub win_value: u32,
    pub history_limit: usize,
    pub four_probability: f64,
    pub mapping_mode: MappingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            win_value: DEFAULT_WIN_VALUE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            mapping_mode: MappingMode::Provenance,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let size = lookup("T2048_SIZE")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(n))
            .unwrap_or(defaults.size);

        let win_value = lookup("T2048_WIN_VALUE")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&v| v >= 4 && is_valid_tile_value(v))
            .unwrap_or(defaults.win_value);

        let history_limit = lookup("T2048_HISTORY")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(defaults.history_limit);

        let four_probability = lookup("T2048_FOUR_PROBABILITY")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|p| (0.0..=1.0).contains(p))
            .unwrap_or(defaults.four_probability);

        let mapping_mode = lookup("T2048_MAPPING")
            .and_then(|s| MappingMode::from_str(&s))
            .unwrap_or(defaults.mapping_mode);

        Self {
            size,
            win_value,
            history_limit,
            four_probability,
            mapping_mode,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        self
    }

    pub fn with_win_value(mut self, win_value: u32) -> Self {
        if win_value >= 4 && is_valid_tile_value(win_value) {
            self.win_value = win_value;
        }
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn with_mapping_mode(mut self, mode: MappingMode) -> Self {
        self.mapping_mode = mode;
        self
    }
}
