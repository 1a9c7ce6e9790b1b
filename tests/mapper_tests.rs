//! Move mapping tests: diff reconstruction against the engine's own provenance

use std::collections::BTreeSet;

use tui_2048::core::{
    map_move, Board, EngineConfig, GridEngine, MoveMapping, NullBestScore, ScriptedTileSource,
    Snapshot, TileMerge, TileMove,
};
use tui_2048::types::{Direction, Position};

fn engine_on(rows: [[u32; 4]; 4]) -> GridEngine {
    let mut engine = GridEngine::with_parts(
        EngineConfig::default(),
        Box::new(ScriptedTileSource::default()),
        Box::new(NullBestScore),
    );
    engine.set_state(Snapshot {
        board: Board::from_rows(&rows).unwrap(),
        score: 0,
        game_over: false,
        won: false,
        has_won: false,
    });
    engine
}

/// Engine mapping plus the post-slide board (spawned tile removed)
fn engine_mapping(rows: [[u32; 4]; 4], direction: Direction) -> (Board, MoveMapping) {
    let mut engine = engine_on(rows);
    let result = engine.move_in(direction);
    assert!(result.moved);

    let mut after = engine.board().clone();
    if let Some(tile) = result.new_tile {
        after.set(tile.position.row, tile.position.col, 0);
    }
    (after, result.mapping)
}

#[test]
fn test_diff_matches_provenance_on_unambiguous_boards() {
    let cases = [
        [[2, 2, 4, 0], [0, 8, 0, 8], [16, 0, 0, 0], [0, 0, 0, 32]],
        [[0, 0, 0, 2], [4, 0, 0, 0], [0, 8, 8, 0], [2, 4, 8, 16]],
        [[2, 0, 0, 0], [2, 4, 0, 0], [4, 4, 0, 0], [0, 8, 0, 0]],
        [[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]],
        [[4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]],
        [[0, 2, 0, 0], [0, 2, 0, 0], [0, 2, 0, 0], [0; 4]],
    ];

    for rows in cases {
        for direction in Direction::ALL {
            if !engine_on(rows).can_slide(direction) {
                continue;
            }
            let old = Board::from_rows(&rows).unwrap();
            let (after, exact) = engine_mapping(rows, direction);
            let diffed = map_move(&old, &after, direction);
            assert_eq!(diffed, exact, "{:?} {:?}", rows, direction);
        }
    }
}

#[test]
fn test_mapping_covers_every_tile() {
    let rows = [[2, 2, 2, 2], [4, 0, 4, 0], [0, 8, 0, 0], [2, 4, 2, 4]];
    for direction in Direction::ALL {
        let old = Board::from_rows(&rows).unwrap();
        let (after, mapping) = engine_mapping(rows, direction);

        let before: BTreeSet<Position> = old.occupied_positions().into_iter().collect();
        let landed: BTreeSet<Position> = after.occupied_positions().into_iter().collect();
        assert_eq!(mapping.sources(), before, "{:?}", direction);
        assert_eq!(mapping.targets(), landed, "{:?}", direction);

        let source_count =
            mapping.moves.len() + mapping.merges.iter().map(|m| m.from.len()).sum::<usize>();
        assert_eq!(source_count, before.len());
    }
}

#[test]
fn test_four_equal_tiles_pair_from_the_edge() {
    let old = Board::from_rows(&[[2u32, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    let new = Board::from_rows(&[[4u32, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let mapping = map_move(&old, &new, Direction::Left);

    assert!(mapping.moves.is_empty());
    assert_eq!(
        mapping.merges,
        vec![
            TileMerge {
                from: [Position::new(0, 0), Position::new(0, 1)],
                to: Position::new(0, 0),
                value: 4,
            },
            TileMerge {
                from: [Position::new(0, 2), Position::new(0, 3)],
                to: Position::new(0, 1),
                value: 4,
            },
        ]
    );
}

#[test]
fn test_four_equal_tiles_pair_from_the_right_edge() {
    let old = Board::from_rows(&[[2u32, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    let new = Board::from_rows(&[[0u32, 0, 4, 4], [0; 4], [0; 4], [0; 4]]).unwrap();
    let mapping = map_move(&old, &new, Direction::Right);

    assert!(mapping.moves.is_empty());
    assert_eq!(
        mapping.merges,
        vec![
            TileMerge {
                from: [Position::new(0, 1), Position::new(0, 0)],
                to: Position::new(0, 2),
                value: 4,
            },
            TileMerge {
                from: [Position::new(0, 3), Position::new(0, 2)],
                to: Position::new(0, 3),
                value: 4,
            },
        ]
    );
}

#[test]
fn test_four_equal_tiles_pair_from_the_bottom_edge() {
    let old = Board::from_rows(&[[0u32, 0, 8, 0], [0, 0, 8, 0], [0, 0, 8, 0], [0, 0, 8, 0]])
        .unwrap();
    let new = Board::from_rows(&[[0u32; 4], [0; 4], [0, 0, 16, 0], [0, 0, 16, 0]]).unwrap();
    let mapping = map_move(&old, &new, Direction::Down);

    assert!(mapping.moves.is_empty());
    assert_eq!(
        mapping.merges,
        vec![
            TileMerge {
                from: [Position::new(1, 2), Position::new(0, 2)],
                to: Position::new(2, 2),
                value: 16,
            },
            TileMerge {
                from: [Position::new(3, 2), Position::new(2, 2)],
                to: Position::new(3, 2),
                value: 16,
            },
        ]
    );

    let (_, exact) = engine_mapping(
        [[0, 0, 8, 0], [0, 0, 8, 0], [0, 0, 8, 0], [0, 0, 8, 0]],
        Direction::Down,
    );
    assert_eq!(mapping, exact);
}

#[test]
fn test_spawned_tile_is_not_mapped() {
    let old = Board::from_rows(&[[0u32, 0, 0, 4], [0; 4], [0; 4], [0; 4]]).unwrap();
    // 4 slid left; a 2 appeared at (3, 3)
    let new = Board::from_rows(&[[4u32, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]]).unwrap();
    let mapping = map_move(&old, &new, Direction::Left);

    assert_eq!(
        mapping.moves,
        vec![TileMove {
            from: Position::new(0, 3),
            to: Position::new(0, 0),
            value: 4,
        }]
    );
    assert!(mapping.merges.is_empty());
}

#[test]
fn test_stationary_tiles_are_reported() {
    let (_, mapping) =
        engine_mapping([[8, 0, 4, 0], [2, 0, 0, 0], [0; 4], [0; 4]], Direction::Left);
    let stationary: Vec<&TileMove> = mapping.moves.iter().filter(|m| m.is_stationary()).collect();
    assert_eq!(stationary.len(), 2);
    assert_eq!(mapping.sliding_moves().count(), 1);
}

#[test]
fn test_size_mismatch_gives_empty_mapping() {
    let small = Board::new(3);
    let large = Board::new(4);
    assert!(map_move(&small, &large, Direction::Up).is_empty());
}
