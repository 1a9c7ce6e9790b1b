//! Line reduction - the single slide primitive
//!
//! Every direction is expressed as "slide toward index 0 and merge once" over a
//! line read from the destination edge (see [`crate::Board::line_indices`]).
//!
//! Algorithm:
//! 1. Compact: drop zeros, keep relative order
//! 2. Merge: scan front to back, equal neighbours combine into one tile of
//!    double value; a freshly merged tile never merges again in the same pass
//! 3. Pad with zeros back to the line length
//!
//! Alongside the values the reducer records where every output tile came from,
//! so callers get exact move/merge provenance without diffing boards.

use arrayvec::ArrayVec;

use crate::types::can_merge;

/// Origin of one output slot, as indices into the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSource {
    /// Nothing ends up here
    Empty,
    /// A single tile slid (or stayed) here
    Slid { from: usize },
    /// Two tiles merged here; `from[0]` is the one nearer the destination edge
    Merged { from: [usize; 2] },
}

/// Result of reducing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReduction {
    pub line: Vec<u32>,
    /// Sum of merged tile values
    pub score_delta: u32,
    /// Whether any slot differs from the input
    pub changed: bool,
    /// One entry per output slot
    pub provenance: Vec<SlotSource>,
}

impl LineReduction {
    /// Number of merges performed
    pub fn merge_count(&self) -> usize {
        self.provenance
            .iter()
            .filter(|s| matches!(s, SlotSource::Merged { .. }))
            .count()
    }
}

/// Slide a line toward index 0 and merge each pair at most once.
///
/// # Examples
///
/// ```
/// use tui_2048_core::reduce_line;
///
/// let r = reduce_line(&[2, 0, 2, 2]);
/// assert_eq!(r.line, vec![4, 2, 0, 0]);
/// assert_eq!(r.score_delta, 4);
/// assert!(r.changed);
/// ```
pub fn reduce_line(input: &[u32]) -> LineReduction {
    let len = input.len();

    // (input index, value) of every tile, in order
    let compacted: Vec<(usize, u32)> = input
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v != 0)
        .collect();

    let mut line = Vec::with_capacity(len);
    let mut provenance = Vec::with_capacity(len);
    let mut score_delta: u32 = 0;

    let mut i = 0;
    while i < compacted.len() {
        let (from, value) = compacted[i];
        match compacted.get(i + 1) {
            Some(&(next_from, next_value)) if next_value == value && can_merge(value) => {
                let merged = value * 2;
                line.push(merged);
                provenance.push(SlotSource::Merged {
                    from: [from, next_from],
                });
                score_delta = score_delta.saturating_add(merged);
                i += 2;
            }
            _ => {
                line.push(value);
                provenance.push(SlotSource::Slid { from });
                i += 1;
            }
        }
    }

    line.resize(len, 0);
    provenance.resize(len, SlotSource::Empty);

    let changed = line.as_slice() != input;

    LineReduction {
        line,
        score_delta,
        changed,
        provenance,
    }
}

/// Whether sliding this line would change it, without building the result.
pub fn line_can_slide(input: &[u32]) -> bool {
    let mut seen_gap = false;
    let mut last: Option<u32> = None;
    for &v in input {
        if v == 0 {
            seen_gap = true;
            continue;
        }
        if seen_gap || (last == Some(v) && can_merge(v)) {
            return true;
        }
        last = Some(v);
    }
    false
}

/// Merge pairs of one reduction as (input indices, merged value), nearest
/// the destination edge first.
///
/// A line of length n holds at most n / 2 merges; the capacity covers the
/// largest supported board.
pub fn merged_pairs(
    reduction: &LineReduction,
) -> ArrayVec<([usize; 2], u32), { crate::types::MAX_BOARD_SIZE / 2 }> {
    let mut out = ArrayVec::new();
    for (slot, source) in reduction.provenance.iter().enumerate() {
        if let SlotSource::Merged { from } = source {
            if out.try_push((*from, reduction.line[slot])).is_err() {
                break;
            }
        }
    }
    out
}
