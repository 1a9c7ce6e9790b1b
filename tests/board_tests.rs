//! Line reduction and board tests

use tui_2048::core::{line_can_slide, merged_pairs, reduce_line, Board, GridEngine, Snapshot};
use tui_2048::types::{Direction, Position};

/// Every line of length 4 over {0, 2, 4, 8}
fn all_lines() -> Vec<[u32; 4]> {
    let values = [0u32, 2, 4, 8];
    let mut lines = Vec::new();
    for a in values {
        for b in values {
            for c in values {
                for d in values {
                    lines.push([a, b, c, d]);
                }
            }
        }
    }
    lines
}

#[test]
fn test_reduce_examples() {
    let r = reduce_line(&[2, 2, 0, 0]);
    assert_eq!(r.line, vec![4, 0, 0, 0]);
    assert_eq!(r.score_delta, 4);
    assert!(r.changed);

    let r = reduce_line(&[2, 0, 2, 2]);
    assert_eq!(r.line, vec![4, 2, 0, 0]);
    assert_eq!(r.score_delta, 4);

    let r = reduce_line(&[4, 4, 4, 4]);
    assert_eq!(r.line, vec![8, 8, 0, 0]);
    assert_eq!(r.score_delta, 16);

    let r = reduce_line(&[2, 4, 8, 16]);
    assert!(!r.changed);
    assert_eq!(r.score_delta, 0);
}

#[test]
fn test_changed_matches_can_slide() {
    for line in all_lines() {
        assert_eq!(
            reduce_line(&line).changed,
            line_can_slide(&line),
            "line {:?}",
            line
        );
    }
}

#[test]
fn test_score_delta_is_sum_of_merges() {
    for line in all_lines() {
        let r = reduce_line(&line);
        let merged: u32 = merged_pairs(&r).iter().map(|&(_, value)| value).sum();
        assert_eq!(r.score_delta, merged, "line {:?}", line);

        for &([a, b], value) in merged_pairs(&r).iter() {
            assert_eq!(line[a] * 2, value);
            assert_eq!(line[b] * 2, value);
        }
    }
}

#[test]
fn test_reduced_line_is_compacted() {
    for line in all_lines() {
        let out = reduce_line(&line).line;
        let first_gap = out.iter().position(|&v| v == 0).unwrap_or(out.len());
        assert!(out[first_gap..].iter().all(|&v| v == 0), "line {:?}", line);

        // Reducing again only merges, never slides
        let again = reduce_line(&out);
        if !out.windows(2).any(|w| w[0] != 0 && w[0] == w[1]) {
            assert!(!again.changed, "line {:?}", line);
        }
    }
}

#[test]
fn test_tile_sum_is_preserved() {
    for line in all_lines() {
        let before: u32 = line.iter().sum();
        let after: u32 = reduce_line(&line).line.iter().sum();
        assert_eq!(before, after);
    }
}

#[test]
fn test_line_indices_start_at_destination_edge() {
    let board = Board::new(4);
    assert_eq!(board.line_indices(Direction::Left, 1), vec![4, 5, 6, 7]);
    assert_eq!(board.line_indices(Direction::Right, 1), vec![7, 6, 5, 4]);
    assert_eq!(board.line_indices(Direction::Up, 2), vec![2, 6, 10, 14]);
    assert_eq!(board.line_indices(Direction::Down, 2), vec![14, 10, 6, 2]);
}

#[test]
fn test_board_from_rows_validation() {
    assert!(Board::from_rows(&[[2u32, 0], [0, 4]]).is_some());
    assert!(Board::from_rows(&[[2u32, 0, 0], [0, 4, 0]]).is_none());
    assert!(Board::from_rows(&[[6u32, 0], [0, 4]]).is_none());
    assert!(Board::from_rows(&[[1u32, 0], [0, 4]]).is_none());
}

#[test]
fn test_can_move_full_boards() {
    let stuck = [[2u32, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
    let snapshot = |rows: [[u32; 4]; 4]| Snapshot {
        board: Board::from_rows(&rows).unwrap(),
        score: 0,
        game_over: false,
        won: false,
        has_won: false,
    };

    let mut engine = GridEngine::new(1);
    engine.set_state(snapshot(stuck));
    assert!(!engine.can_move());

    // One vertical pair in the last column
    let mut vertical = stuck;
    vertical[0][3] = 8;
    vertical[1][3] = 8;
    engine.set_state(snapshot(vertical));
    assert!(engine.can_move());
    assert!(engine.can_slide(Direction::Up));
    assert!(!engine.can_slide(Direction::Left));

    // One horizontal pair in the first row
    let mut horizontal = stuck;
    horizontal[0][0] = 8;
    horizontal[0][1] = 8;
    engine.set_state(snapshot(horizontal));
    assert!(engine.can_move());
    assert!(engine.can_slide(Direction::Left));
}

#[test]
fn test_board_display() {
    let board = Board::from_rows(&[[2u32, 0], [0, 2048]]).unwrap();
    let text = board.to_string();
    assert!(text.contains("2048"));
    assert_eq!(text.lines().count(), 5);
    assert_eq!(board.max_tile(), 2048);
    assert_eq!(board.occupied_positions(), vec![Position::new(0, 0), Position::new(1, 1)]);
}
