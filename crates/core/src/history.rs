//! Undo history - bounded snapshot stack
//!
//! The top of the stack is the most recently committed state. Pushing onto a
//! full stack evicts the oldest entry first.

use std::collections::VecDeque;

use crate::snapshot::Snapshot;
use crate::types::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoHistory {
    entries: VecDeque<Snapshot>,
    limit: usize,
}

impl UndoHistory {
    /// Create an empty history holding at most `limit` snapshots (minimum 1)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push a snapshot, evicting the oldest one when full
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Push only if the snapshot differs from the current top.
    ///
    /// Returns whether a push happened.
    pub fn push_if_changed(&mut self, snapshot: Snapshot) -> bool {
        if self.peek() == Some(&snapshot) {
            return false;
        }
        self.push(snapshot);
        true
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// Roll back one step.
    ///
    /// Pops the current top and returns the new top. Refuses (returns `None`)
    /// when that would leave the history empty.
    pub fn step_back(&mut self) -> Option<&Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
