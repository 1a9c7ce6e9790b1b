//! Game state module - the grid state machine
//!
//! [`GridEngine`] owns the board, score, flags and undo history. Every
//! directional move runs the line reducer over each row or column, updates
//! score and best score, spawns one tile, then re-evaluates the win latch and
//! game-over condition. Maintenance operations (undo, revive, tile removal,
//! continue) never spawn tiles.
//!
//! The top of the undo history is always the most recently committed state, so
//! `undo` drops the top and restores the entry beneath it.

use std::fmt;

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::best::{BestScoreStore, NullBestScore};
use crate::board::Board;
use crate::codec::{self, RawSavedGame, SavedGame};
use crate::config::{EngineConfig, MappingMode};
use crate::history::UndoHistory;
use crate::line::{line_can_slide, reduce_line, LineReduction};
use crate::mapper::{map_move, MoveMapping};
use crate::rng::{spawn_random_tile, SeededTileSource, SpawnedTile, TileSource};
use crate::snapshot::Snapshot;
use crate::types::{Direction, Position, INITIAL_TILES, REVIVE_REMOVE_COUNT};

/// Outcome of a single `move_in` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: bool,
    pub score_delta: u32,
    pub new_tile: Option<SpawnedTile>,
    pub game_over: bool,
    /// True only on the move that first reaches the win tile
    pub won: bool,
    pub mapping: MoveMapping,
}

impl MoveResult {
    fn rejected(game_over: bool) -> Self {
        Self {
            game_over,
            ..Self::default()
        }
    }
}

pub struct GridEngine {
    config: EngineConfig,
    board: Board,
    score: u32,
    best_score: u32,
    game_over: bool,
    won: bool,
    has_won: bool,
    history: UndoHistory,
    tiles: Box<dyn TileSource>,
    best_store: Box<dyn BestScoreStore>,
}

impl GridEngine {
    /// Create a started game with default rules, a seeded spawner and no
    /// best-score persistence
    pub fn new(seed: u64) -> Self {
        let config = EngineConfig::default();
        let tiles = SeededTileSource::new(seed).with_four_probability(config.four_probability);
        Self::with_parts(config, Box::new(tiles), Box::new(NullBestScore))
    }

    /// Create a started game from explicit collaborators.
    ///
    /// The best score is read from `best_store` once here; a failed read is
    /// logged and treated as 0.
    pub fn with_parts(
        config: EngineConfig,
        tiles: Box<dyn TileSource>,
        mut best_store: Box<dyn BestScoreStore>,
    ) -> Self {
        let best_score = match best_store.load() {
            Ok(best) => best,
            Err(e) => {
                warn!("failed to load best score: {}", e);
                0
            }
        };

        let mut engine = Self {
            board: Board::new(config.size),
            history: UndoHistory::new(config.history_limit),
            config,
            score: 0,
            best_score,
            game_over: false,
            won: false,
            has_won: false,
            tiles,
            best_store,
        };
        engine.init();
        engine
    }

    /// Start a new game: empty board, two spawned tiles, fresh history.
    ///
    /// The best score survives.
    pub fn init(&mut self) {
        self.board = Board::new(self.config.size);
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.has_won = false;
        self.history = UndoHistory::new(self.config.history_limit);

        for _ in 0..INITIAL_TILES {
            spawn_random_tile(&mut self.board, self.tiles.as_mut());
        }

        self.history.push(self.snapshot());
        debug!(
            "new {}x{} game, best score {}",
            self.config.size, self.config.size, self.best_score
        );
    }

    /// Slide every line toward `direction`
    pub fn move_in(&mut self, direction: Direction) -> MoveResult {
        if self.game_over {
            return MoveResult::rejected(true);
        }

        let n = self.board.size();
        let reductions: Vec<LineReduction> = (0..n)
            .map(|k| {
                let indices = self.board.line_indices(direction, k);
                reduce_line(&self.board.read_line(&indices))
            })
            .collect();

        if !reductions.iter().any(|r| r.changed) {
            return MoveResult::rejected(false);
        }

        // Pre-move state is normally already on top; this covers adopted states
        self.history.push_if_changed(self.snapshot());

        let old = self.board.clone();
        let mut score_delta = 0u32;
        for (k, reduction) in reductions.iter().enumerate() {
            score_delta = score_delta.saturating_add(reduction.score_delta);
            if reduction.changed {
                let indices = old.line_indices(direction, k);
                self.board.write_line(&indices, &reduction.line);
            }
        }

        self.score = self.score.saturating_add(score_delta);
        self.update_best();

        let mapping = match self.config.mapping_mode {
            MappingMode::Provenance => MoveMapping::from_reductions(&old, direction, &reductions),
            MappingMode::Diff => map_move(&old, &self.board, direction),
        };

        let new_tile = spawn_random_tile(&mut self.board, self.tiles.as_mut());

        let mut won = false;
        if !self.has_won && self.has_won_tile() {
            self.won = true;
            self.has_won = true;
            won = true;
            info!("reached {} with score {}", self.config.win_value, self.score);
        }

        if !self.can_move() {
            self.game_over = true;
            info!("game over with score {}", self.score);
        }

        self.history.push(self.snapshot());
        debug!(
            "moved {} (+{}), score {}",
            direction.as_str(),
            score_delta,
            self.score
        );

        MoveResult {
            moved: true,
            score_delta,
            new_tile,
            game_over: self.game_over,
            won,
            mapping,
        }
    }

    /// Move by direction name; unknown names are a rejected move
    pub fn move_named(&mut self, name: &str) -> MoveResult {
        match Direction::from_str(name) {
            Some(direction) => self.move_in(direction),
            None => {
                debug!("ignoring unknown direction {:?}", name);
                MoveResult::rejected(self.game_over)
            }
        }
    }

    /// Whether any legal move remains
    pub fn can_move(&self) -> bool {
        self.board.empty_count() > 0 || self.board.has_adjacent_pair()
    }

    /// Whether a move in `direction` would change the board
    pub fn can_slide(&self, direction: Direction) -> bool {
        (0..self.board.size()).any(|k| {
            let indices = self.board.line_indices(direction, k);
            line_can_slide(&self.board.read_line(&indices))
        })
    }

    /// Directions that would change the board, in [`Direction::ALL`] order
    pub fn legal_directions(&self) -> ArrayVec<Direction, 4> {
        if self.game_over {
            return ArrayVec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_slide(d))
            .collect()
    }

    pub fn has_won_tile(&self) -> bool {
        self.board.contains(self.config.win_value)
    }

    /// Roll back to the previous committed state.
    ///
    /// Returns false when only one state is recorded. The best score is not
    /// rolled back.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.step_back().cloned() else {
            debug!("nothing to undo");
            return false;
        };
        self.restore(previous);
        true
    }

    /// Clear the three lowest tiles after a game over; see
    /// [`GridEngine::revive_with_removed`]
    pub fn revive(&mut self) -> bool {
        self.revive_with_removed().is_some()
    }

    /// Remove the lowest tiles (ties in row-major order) and clear game over.
    ///
    /// Returns the cleared positions, or `None` if the game is not over or the
    /// board is already empty. Score and history are left alone.
    pub fn revive_with_removed(&mut self) -> Option<ArrayVec<Position, REVIVE_REMOVE_COUNT>> {
        if !self.game_over || self.board.is_clear() {
            return None;
        }

        let mut tiles: Vec<(Position, u32)> = self
            .board
            .occupied_positions()
            .into_iter()
            .map(|pos| (pos, self.board.at(pos)))
            .collect();
        // Stable sort keeps scan order among equal values
        tiles.sort_by_key(|&(_, value)| value);

        let removed: ArrayVec<Position, REVIVE_REMOVE_COUNT> = tiles
            .iter()
            .take(REVIVE_REMOVE_COUNT)
            .map(|&(pos, _)| pos)
            .collect();
        for pos in &removed {
            self.board.set(pos.row, pos.col, 0);
        }

        self.game_over = false;
        info!("revived, cleared {} tiles", removed.len());
        Some(removed)
    }

    /// Clear one occupied cell and record the result for undo.
    ///
    /// Out-of-range or empty cells are rejected. Game over is not re-evaluated.
    pub fn remove_tile(&mut self, row: usize, col: usize) -> bool {
        match self.board.get(row, col) {
            Some(value) if value != 0 => {
                self.board.set(row, col, 0);
                self.history.push(self.snapshot());
                debug!("removed {} at ({}, {})", value, row, col);
                true
            }
            _ => false,
        }
    }

    /// Keep playing after a win; the win latch stays set
    pub fn continue_game(&mut self) {
        self.won = false;
    }

    /// Deep copy of the undoable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            score: self.score,
            game_over: self.game_over,
            won: self.won,
            has_won: self.has_won,
        }
    }

    /// Replace the live state and reset history to it
    pub fn set_state(&mut self, snapshot: Snapshot) {
        self.history = UndoHistory::new(self.config.history_limit);
        self.history.push(snapshot.clone());
        self.restore(snapshot);
        self.update_best();
    }

    /// Export live state and history for persistence
    pub fn state(&self) -> SavedGame {
        codec::encode(&self.snapshot(), self.history.iter())
    }

    /// Adopt a persisted game.
    ///
    /// Anything invalid discards the record and starts a fresh game; the
    /// return value says whether the record was adopted. The best score is
    /// re-read from the store either way.
    pub fn load_game(&mut self, raw: RawSavedGame) -> bool {
        self.reload_best();

        let decoded = match codec::decode(raw, self.config.size) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("discarding saved game: {}", e);
                self.init();
                return false;
            }
        };

        let mut history = UndoHistory::new(self.config.history_limit);
        for snapshot in decoded.history {
            history.push(snapshot);
        }
        history.push_if_changed(decoded.live.clone());
        self.history = history;

        self.restore(decoded.live);
        self.update_best();
        debug!(
            "loaded saved game, score {}, {} undo steps",
            self.score,
            self.history.len()
        );
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.score = snapshot.score;
        self.game_over = snapshot.game_over;
        self.won = snapshot.won;
        self.has_won = snapshot.has_won;
    }

    fn update_best(&mut self) {
        if self.score <= self.best_score {
            return;
        }
        self.best_score = self.score;
        if let Err(e) = self.best_store.save(self.best_score) {
            warn!("failed to save best score: {}", e);
        }
    }

    fn reload_best(&mut self) {
        match self.best_store.load() {
            Ok(stored) => self.best_score = self.best_score.max(stored),
            Err(e) => warn!("failed to load best score: {}", e),
        }
    }
}

impl fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridEngine")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("score", &self.score)
            .field("best_score", &self.best_score)
            .field("game_over", &self.game_over)
            .field("won", &self.won)
            .field("has_won", &self.has_won)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
