//! State codec - engine state to and from its persisted record
//!
//! The persisted record is `{grid, score, gameOver, won, hasWon, history}` with
//! camelCase keys. The best score is not part of it; it lives behind the
//! [`crate::BestScoreStore`] port.
//!
//! Loading is strict: a record missing `grid` or `score`, holding a grid of the
//! wrong shape, a value that is not a tile, or a malformed history entry is
//! rejected as a whole. Callers fall back to a fresh game instead of adopting a
//! partially valid state.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::snapshot::{Snapshot, SnapshotRecord};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("saved game has no grid")]
    MissingGrid,
    #[error("saved game has no score")]
    MissingScore,
    #[error("grid is not a valid {expected}x{expected} board")]
    BadGrid { expected: usize },
    #[error("history entry {index} is not a valid snapshot")]
    BadHistory { index: usize },
}

/// Complete persisted record, as written by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub grid: Vec<Vec<u32>>,
    pub score: u32,
    pub game_over: bool,
    pub won: bool,
    pub has_won: bool,
    pub history: Vec<SnapshotRecord>,
}

/// Lenient shape used when reading; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSavedGame {
    #[serde(default)]
    pub grid: Option<Vec<Vec<u32>>>,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub game_over: Option<bool>,
    #[serde(default)]
    pub won: Option<bool>,
    #[serde(default)]
    pub has_won: Option<bool>,
    #[serde(default)]
    pub history: Option<Vec<SnapshotRecord>>,
}

impl From<SavedGame> for RawSavedGame {
    fn from(saved: SavedGame) -> Self {
        Self {
            grid: Some(saved.grid),
            score: Some(saved.score),
            game_over: Some(saved.game_over),
            won: Some(saved.won),
            has_won: Some(saved.has_won),
            history: Some(saved.history),
        }
    }
}

/// A validated record ready to be adopted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGame {
    pub live: Snapshot,
    pub history: Vec<Snapshot>,
}

/// Encode live state plus history into the persisted record.
pub fn encode<'a, I>(live: &Snapshot, history: I) -> SavedGame
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    SavedGame {
        grid: live.board.to_rows(),
        score: live.score,
        game_over: live.game_over,
        won: live.won,
        has_won: live.has_won,
        history: history.into_iter().map(Snapshot::to_record).collect(),
    }
}

/// Validate a raw record for a board of `size`.
pub fn decode(raw: RawSavedGame, size: usize) -> Result<DecodedGame, CodecError> {
    let grid = raw.grid.ok_or(CodecError::MissingGrid)?;
    let score = raw.score.ok_or(CodecError::MissingScore)?;

    let board = Board::from_rows(&grid)
        .filter(|b| b.size() == size)
        .ok_or(CodecError::BadGrid { expected: size })?;

    let history = raw
        .history
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .to_snapshot(size)
                .ok_or(CodecError::BadHistory { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedGame {
        live: Snapshot {
            board,
            score,
            game_over: raw.game_over.unwrap_or(false),
            won: raw.won.unwrap_or(false),
            has_won: raw.has_won.unwrap_or(false),
        },
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_json(json: &str) -> RawSavedGame {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_minimal_record() {
        let raw = raw_from_json(r#"{"grid":[[2,0],[0,0]],"score":0}"#);
        let decoded = decode(raw, 2).unwrap();
        assert_eq!(decoded.live.board.get(0, 0), Some(2));
        assert!(!decoded.live.game_over);
        assert!(decoded.history.is_empty());
    }

    #[test]
    fn test_decode_requires_grid_and_score() {
        assert_eq!(
            decode(raw_from_json(r#"{"score":4}"#), 2),
            Err(CodecError::MissingGrid)
        );
        assert_eq!(
            decode(raw_from_json(r#"{"grid":[[2,0],[0,0]]}"#), 2),
            Err(CodecError::MissingScore)
        );
    }

    #[test]
    fn test_decode_rejects_bad_grid() {
        // Wrong size
        assert_eq!(
            decode(raw_from_json(r#"{"grid":[[2,0],[0,0]],"score":0}"#), 4),
            Err(CodecError::BadGrid { expected: 4 })
        );
        // Not a tile value
        assert_eq!(
            decode(raw_from_json(r#"{"grid":[[3,0],[0,0]],"score":0}"#), 2),
            Err(CodecError::BadGrid { expected: 2 })
        );
        // Ragged
        assert_eq!(
            decode(raw_from_json(r#"{"grid":[[2,0],[0]],"score":0}"#), 2),
            Err(CodecError::BadGrid { expected: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_bad_history_entry() {
        let raw = raw_from_json(
            r#"{"grid":[[2,0],[0,0]],"score":0,"history":[
                {"grid":[[2,0],[0,0]],"score":0},
                {"grid":[[5,0],[0,0]],"score":0}
            ]}"#,
        );
        assert_eq!(decode(raw, 2), Err(CodecError::BadHistory { index: 1 }));
    }

    #[test]
    fn test_encode_then_decode_preserves_state() {
        let live = Snapshot {
            board: Board::from_rows(&[[2u32, 4], [0, 8]]).unwrap(),
            score: 20,
            game_over: false,
            won: true,
            has_won: true,
        };
        let earlier = Snapshot {
            score: 12,
            ..live.clone()
        };
        let saved = encode(&live, [&earlier, &live]);
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"hasWon\":true"));

        let raw: RawSavedGame = serde_json::from_str(&json).unwrap();
        let decoded = decode(raw, 2).unwrap();
        assert_eq!(decoded.live, live);
        assert_eq!(decoded.history, vec![earlier, live]);
    }
}
