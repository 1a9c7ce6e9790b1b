use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Deep copy of the undoable part of the engine state.
///
/// Holds its own `Board`, so a snapshot can never alias the live grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub board: Board,
    pub score: u32,
    pub game_over: bool,
    pub won: bool,
    pub has_won: bool,
}

impl Snapshot {
    /// Serializable form (grid as nested rows).
    pub fn to_record(&self) -> SnapshotRecord {
        SnapshotRecord {
            grid: self.board.to_rows(),
            score: self.score,
            game_over: self.game_over,
            won: self.won,
            has_won: self.has_won,
        }
    }
}

/// Wire shape of a snapshot: `{grid, score, gameOver, won, hasWon}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub grid: Vec<Vec<u32>>,
    pub score: u32,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub won: bool,
    #[serde(default)]
    pub has_won: bool,
}

impl SnapshotRecord {
    /// Rebuild a snapshot; `None` if the grid is not a valid board of `size`.
    pub fn to_snapshot(&self, size: usize) -> Option<Snapshot> {
        let board = Board::from_rows(&self.grid)?;
        if board.size() != size {
            return None;
        }
        Some(Snapshot {
            board,
            score: self.score,
            game_over: self.game_over,
            won: self.won,
            has_won: self.has_won,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut board = Board::new(4);
        board.set(0, 0, 2);
        let snap = Snapshot {
            board: board.clone(),
            score: 0,
            game_over: false,
            won: false,
            has_won: false,
        };
        board.set(0, 0, 4);
        assert_eq!(snap.board.get(0, 0), Some(2));
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let snap = Snapshot {
            board: Board::new(2),
            score: 12,
            game_over: true,
            won: false,
            has_won: true,
        };
        let json = serde_json::to_value(snap.to_record()).unwrap();
        assert_eq!(json["gameOver"], true);
        assert_eq!(json["hasWon"], true);
        assert_eq!(json["score"], 12);
        assert_eq!(json["grid"], serde_json::json!([[0, 0], [0, 0]]));
    }

    #[test]
    fn test_record_rejects_wrong_size() {
        let record = SnapshotRecord {
            grid: vec![vec![0, 0], vec![0, 0]],
            score: 0,
            game_over: false,
            won: false,
            has_won: false,
        };
        assert!(record.to_snapshot(2).is_some());
        assert!(record.to_snapshot(4).is_none());
    }
}
