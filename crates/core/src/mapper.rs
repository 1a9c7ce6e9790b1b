//! Move mapping - which old tile became which new tile
//!
//! Presentation layers need to know, per move, which tiles slid where and which
//! pairs merged. Two ways of producing that record live here:
//!
//! - [`MoveMapping::from_reductions`] re-indexes the provenance the line reducer
//!   recorded while computing the move. This is exact and is what the engine
//!   uses by default.
//! - [`map_move`] reconstructs a mapping from a before/after pair of boards
//!   alone. It is a best-effort diff: when several equal tiles are candidates it
//!   applies a fixed tie-break so the result is deterministic.
//!
//! Tiles that stay in place are reported as moves with `from == to`. The spawned
//! tile never appears in a mapping.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::line::{LineReduction, SlotSource};
use crate::types::{Direction, Position};

/// One tile sliding from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMove {
    pub from: Position,
    pub to: Position,
    pub value: u32,
}

impl TileMove {
    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// Two tiles combining into one at `to`; `value` is the merged value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMerge {
    pub from: [Position; 2],
    pub to: Position,
    pub value: u32,
}

/// Per-move provenance, ordered by target position (row-major)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveMapping {
    pub moves: Vec<TileMove>,
    pub merges: Vec<TileMerge>,
}

impl MoveMapping {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.merges.is_empty()
    }

    /// Build the mapping from the reductions of every line of `old`.
    ///
    /// `reductions[k]` must be the reduction of line `k` as read by
    /// [`Board::line_indices`] for `direction`.
    pub fn from_reductions(
        old: &Board,
        direction: Direction,
        reductions: &[LineReduction],
    ) -> Self {
        let mut mapping = MoveMapping::default();

        for (k, reduction) in reductions.iter().enumerate() {
            let indices = old.line_indices(direction, k);
            for (slot, source) in reduction.provenance.iter().enumerate() {
                let Some(&target) = indices.get(slot) else {
                    continue;
                };
                let to = old.position_of(target);
                match *source {
                    SlotSource::Empty => {}
                    SlotSource::Slid { from } => {
                        let from = old.position_of(indices[from]);
                        mapping.moves.push(TileMove {
                            from,
                            to,
                            value: old.at(from),
                        });
                    }
                    SlotSource::Merged { from: [a, b] } => {
                        mapping.merges.push(TileMerge {
                            from: [old.position_of(indices[a]), old.position_of(indices[b])],
                            to,
                            value: reduction.line[slot],
                        });
                    }
                }
            }
        }

        mapping.moves.sort_by_key(|m| m.to);
        mapping.merges.sort_by_key(|m| m.to);
        mapping
    }

    /// Every position a tile came from
    pub fn sources(&self) -> BTreeSet<Position> {
        self.moves
            .iter()
            .map(|m| m.from)
            .chain(self.merges.iter().flat_map(|m| m.from))
            .collect()
    }

    /// Every position a tile landed on
    pub fn targets(&self) -> BTreeSet<Position> {
        self.moves
            .iter()
            .map(|m| m.to)
            .chain(self.merges.iter().map(|m| m.to))
            .collect()
    }

    /// Moves that actually change position
    pub fn sliding_moves(&self) -> impl Iterator<Item = &TileMove> {
        self.moves.iter().filter(|m| !m.is_stationary())
    }
}

/// Whether `from -> to` can happen when sliding in `direction`:
/// same line, and `from` at or behind `to` along the slide.
pub fn is_consistent(from: Position, to: Position, direction: Direction) -> bool {
    match direction {
        Direction::Up => from.col == to.col && from.row >= to.row,
        Direction::Down => from.col == to.col && from.row <= to.row,
        Direction::Left => from.row == to.row && from.col >= to.col,
        Direction::Right => from.row == to.row && from.col <= to.col,
    }
}

/// Distance from `from` to `to` along the slide axis
fn axial_distance(from: Position, to: Position, direction: Direction) -> usize {
    if direction.is_horizontal() {
        from.col.abs_diff(to.col)
    } else {
        from.row.abs_diff(to.row)
    }
}

/// Reconstruct a mapping from two boards.
///
/// Targets are visited line by line from the destination edge inward.
///
/// 1. Merge pass over `new`: old tiles of half the new value with a
///    consistent displacement are candidates; with two or more, the two nearest
///    along the slide axis win, ties broken by Manhattan distance, then by scan
///    order.
/// 2. Move pass: each unclaimed new tile takes the nearest unclaimed old tile of
///    equal value with a consistent displacement (same ordering).
/// 3. New tiles left unclaimed (the spawned tile) are not mapped.
///
/// Boards of different sizes produce an empty mapping.
pub fn map_move(old: &Board, new: &Board, direction: Direction) -> MoveMapping {
    let mut mapping = MoveMapping::default();
    if old.size() != new.size() {
        return mapping;
    }

    let cells = old.cells().len();
    let mut used_old = vec![false; cells];
    let mut used_new = vec![false; cells];

    let candidates = |used_old: &[bool], value: u32, to: Position| -> Vec<usize> {
        let mut found: Vec<usize> = old
            .cells()
            .iter()
            .enumerate()
            .filter(|&(i, &v)| {
                v == value && !used_old[i] && is_consistent(old.position_of(i), to, direction)
            })
            .map(|(i, _)| i)
            .collect();
        // Stable: equal keys keep row-major scan order
        found.sort_by_key(|&i| {
            let from = old.position_of(i);
            (axial_distance(from, to, direction), from.manhattan(to))
        });
        found
    };

    // Targets from the destination edge inward, line by line
    let targets: Vec<usize> = (0..new.size())
        .flat_map(|k| new.line_indices(direction, k))
        .collect();

    // Merges first, so merge targets are claimed before plain moves
    for &target in &targets {
        let value = new.cells()[target];
        if value < 4 || used_new[target] {
            continue;
        }
        let to = new.position_of(target);
        let found = candidates(&used_old, value / 2, to);
        if let [a, b, ..] = *found.as_slice() {
            used_old[a] = true;
            used_old[b] = true;
            used_new[target] = true;
            mapping.merges.push(TileMerge {
                from: [old.position_of(a), old.position_of(b)],
                to,
                value,
            });
        }
    }

    for &target in &targets {
        let value = new.cells()[target];
        if value == 0 || used_new[target] {
            continue;
        }
        let to = new.position_of(target);
        if let Some(&source) = candidates(&used_old, value, to).first() {
            used_old[source] = true;
            used_new[target] = true;
            mapping.moves.push(TileMove {
                from: old.position_of(source),
                to,
                value,
            });
        }
    }

    mapping.moves.sort_by_key(|m| m.to);
    mapping.merges.sort_by_key(|m| m.to);
    mapping
}
