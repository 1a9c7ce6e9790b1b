//! RNG module - random tile spawning
//!
//! Spawning decides two things: which empty cell receives the tile (uniform
//! over the empty cells in row-major order) and its value (2 with probability
//! 0.9, otherwise 4). Both decisions go through the [`TileSource`] trait so the
//! engine can be driven by a seeded generator or by a scripted sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::types::{Position, DEFAULT_FOUR_PROBABILITY};

/// Source of spawn decisions
pub trait TileSource {
    /// Pick an index in `0..len` (`len` is never 0)
    fn pick_index(&mut self, len: usize) -> usize;

    /// Pick the value of the next spawned tile
    fn pick_value(&mut self) -> u32;
}

/// A tile placed by the spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub position: Position,
    pub value: u32,
}

/// Seedable spawner backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededTileSource {
    rng: ChaCha8Rng,
    four_probability: f64,
}

impl SeededTileSource {
    /// Create a spawner with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }

    /// Create a spawner seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }

    /// Override the chance of spawning a 4 (clamped to [0, 1])
    pub fn with_four_probability(mut self, p: f64) -> Self {
        self.four_probability = if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            DEFAULT_FOUR_PROBABILITY
        };
        self
    }

    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }
}

impl TileSource for SeededTileSource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn pick_value(&mut self) -> u32 {
        if self.rng.gen_bool(self.four_probability) {
            4
        } else {
            2
        }
    }
}

/// Replays a fixed list of spawn decisions
///
/// Each entry is `(index into the empty cells, value)`. Indices wrap around the
/// number of empty cells. Once the script runs out, spawns go to the first
/// empty cell with value 2.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTileSource {
    script: VecDeque<(usize, u32)>,
    pending_value: Option<u32>,
}

impl ScriptedTileSource {
    pub fn new<I: IntoIterator<Item = (usize, u32)>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
            pending_value: None,
        }
    }
}

impl TileSource for ScriptedTileSource {
    fn pick_index(&mut self, len: usize) -> usize {
        match self.script.pop_front() {
            Some((index, value)) => {
                self.pending_value = Some(value);
                index % len.max(1)
            }
            None => {
                self.pending_value = None;
                0
            }
        }
    }

    fn pick_value(&mut self) -> u32 {
        self.pending_value.take().unwrap_or(2)
    }
}

/// Place one tile on a random empty cell.
///
/// Returns `None` (and leaves the board untouched) when the board is full.
pub fn spawn_random_tile(board: &mut Board, source: &mut dyn TileSource) -> Option<SpawnedTile> {
    let empty = board.empty_indices();
    if empty.is_empty() {
        return None;
    }

    let index = empty[source.pick_index(empty.len()).min(empty.len() - 1)];
    let value = source.pick_value();
    board.set_index(index, value);

    Some(SpawnedTile {
        position: board.position_of(index),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut a = SeededTileSource::new(12345);
        let mut b = SeededTileSource::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(a.pick_index(16), b.pick_index(16));
            assert_eq!(a.pick_value(), b.pick_value());
        }
    }

    #[test]
    fn test_seeded_values_are_two_or_four() {
        let mut source = SeededTileSource::new(7);
        let mut fours = 0;
        for _ in 0..1000 {
            match source.pick_value() {
                2 => {}
                4 => fours += 1,
                other => panic!("unexpected spawn value {}", other),
            }
        }
        // Roughly 10% fours
        assert!(fours > 30 && fours < 200, "fours = {}", fours);
    }

    #[test]
    fn test_four_probability_extremes() {
        let mut only_twos = SeededTileSource::new(1).with_four_probability(0.0);
        let mut only_fours = SeededTileSource::new(1).with_four_probability(1.0);
        for _ in 0..50 {
            assert_eq!(only_twos.pick_value(), 2);
            assert_eq!(only_fours.pick_value(), 4);
        }
        let nan = SeededTileSource::new(1).with_four_probability(f64::NAN);
        assert_eq!(nan.four_probability(), DEFAULT_FOUR_PROBABILITY);
    }

    #[test]
    fn test_spawn_fills_empty_cell() {
        let mut board = Board::new(4);
        let mut source = SeededTileSource::new(99);
        let tile = spawn_random_tile(&mut board, &mut source).unwrap();
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.at(tile.position), tile.value);
    }

    #[test]
    fn test_spawn_on_full_board_is_none() {
        let mut board = Board::from_rows(&[[2u32, 4], [8, 16]]).unwrap();
        let before = board.clone();
        let mut source = SeededTileSource::new(1);
        assert!(spawn_random_tile(&mut board, &mut source).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_scripted_source_replays_and_wraps() {
        let mut board = Board::new(2);
        let mut source = ScriptedTileSource::new([(3, 4), (5, 2)]);

        let first = spawn_random_tile(&mut board, &mut source).unwrap();
        assert_eq!(first.position, Position::new(1, 1));
        assert_eq!(first.value, 4);

        // Three empty cells left: index 5 wraps to 2 -> (1, 0)
        let second = spawn_random_tile(&mut board, &mut source).unwrap();
        assert_eq!(second.position, Position::new(1, 0));
        assert_eq!(second.value, 2);

        // Exhausted: first empty cell, value 2
        let third = spawn_random_tile(&mut board, &mut source).unwrap();
        assert_eq!(third.position, Position::new(0, 0));
        assert_eq!(third.value, 2);
    }
}
