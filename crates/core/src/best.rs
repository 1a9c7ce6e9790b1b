//! Best-score port
//!
//! The best score outlives individual games, so the engine reads it once at
//! construction and writes it back whenever it improves. Storage lives behind
//! [`BestScoreStore`]; failures are reported to the engine, which logs them and
//! carries on.

use std::cell::Cell;
use std::rc::Rc;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored value for {key}: {reason}")]
    Malformed { key: String, reason: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read/write port for the persisted best score
pub trait BestScoreStore {
    /// Stored best score; 0 when nothing has been stored yet
    fn load(&mut self) -> Result<u32, StoreError>;

    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

/// Keeps the best score in memory only
///
/// Clones share the same cell, which lets tests observe what the engine wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScore {
    value: Rc<Cell<u32>>,
}

impl MemoryBestScore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    pub fn get(&self) -> u32 {
        self.value.get()
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.value.get())
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.value.set(best);
        Ok(())
    }
}

/// Discards writes and always loads 0
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBestScore;

impl BestScoreStore for NullBestScore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(0)
    }

    fn save(&mut self, _best: u32) -> Result<(), StoreError> {
        Ok(())
    }
}
