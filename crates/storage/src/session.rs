//! Session - when a game is read from and written to the store
//!
//! A saved game lives under `gameState`. It is written after every command
//! while the game is still running; a finished game is never written, so the
//! record left behind is the last playable position.

use log::{debug, warn};

use crate::core::{GridEngine, RawSavedGame};
use crate::store::KeyValueStore;
use crate::types::GAME_STATE_KEY;

#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the saved game into `engine`.
    ///
    /// With nothing saved the engine keeps its current game. An unreadable or
    /// invalid record restarts the engine. Returns whether a saved game was
    /// adopted.
    pub fn restore(&self, engine: &mut GridEngine) -> bool {
        let value = match self.store.get(GAME_STATE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("no saved game");
                return false;
            }
            Err(e) => {
                warn!("failed to read saved game: {}", e);
                engine.init();
                return false;
            }
        };

        match serde_json::from_value::<RawSavedGame>(value) {
            Ok(raw) => engine.load_game(raw),
            Err(e) => {
                warn!("failed to decode saved game: {}", e);
                engine.init();
                false
            }
        }
    }

    /// Write the engine's game unless it is over. Returns whether it was written.
    pub fn persist(&mut self, engine: &GridEngine) -> bool {
        if engine.is_game_over() {
            debug!("game over, keeping previous save");
            return false;
        }

        let value = match serde_json::to_value(engine.state()) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to encode game: {}", e);
                return false;
            }
        };

        match self.store.set(GAME_STATE_KEY, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to save game: {}", e);
                false
            }
        }
    }

    /// Forget the saved game
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(GAME_STATE_KEY) {
            warn!("failed to clear saved game: {}", e);
        }
    }
}
