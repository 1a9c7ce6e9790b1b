//! Terminal 2048 runner (default binary).
//!
//! Reads keys with crossterm, drives the engine, saves after every command and
//! repaints a plain-text view. Saved games and the best score go to
//! `T2048_DATA_DIR` (default `.tui-2048`).

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use env_logger::Env;
use log::warn;

use tui_2048::core::{EngineConfig, GridEngine, SeededTileSource};
use tui_2048::input::{coordinate_from_key, handle_key_event};
use tui_2048::storage::{KeyValueStore, MemoryStore, Session, StorageConfig, StoredBestScore};
use tui_2048::term::{GameView, StatusLine, TerminalRenderer};
use tui_2048::types::GameCommand;

/// Tile picking for remove mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Play,
    PickRow,
    PickCol(usize),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn open_stores(config: &StorageConfig) -> (Box<dyn KeyValueStore>, Box<dyn KeyValueStore>) {
    match config.open_store() {
        Ok(store) => (Box::new(store.clone()), Box::new(store)),
        Err(e) => {
            warn!("{}; progress will not be saved", e);
            let store = MemoryStore::new();
            (Box::new(store.clone()), Box::new(store))
        }
    }
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let config = EngineConfig::from_env();
    let (best_store, game_store) = open_stores(&StorageConfig::from_env());

    let tiles = SeededTileSource::from_entropy().with_four_probability(config.four_probability);
    let win_value = config.win_value;
    let mut engine = GridEngine::with_parts(
        config,
        Box::new(tiles),
        Box::new(StoredBestScore::new(best_store)),
    );

    let mut session = Session::new(game_store);
    let mut status = if session.restore(&mut engine) {
        StatusLine::new("Welcome back")
    } else {
        StatusLine::new("New game")
    };

    let view = GameView;
    let mut mode = Mode::Play;

    loop {
        term.draw(&view.render(&engine, &status))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if mode != Mode::Play {
            let (next, message) = pick_tile(&mut engine, mode, key);
            mode = next;
            status = StatusLine::new(message);
            session.persist(&engine);
            continue;
        }

        let Some(command) = handle_key_event(key) else {
            continue;
        };

        status = match command {
            GameCommand::Move(direction) => {
                StatusLine::from_move(&engine.move_in(direction), win_value)
            }
            GameCommand::Undo => StatusLine::new(if engine.undo() {
                "Undone"
            } else {
                "Nothing to undo"
            }),
            GameCommand::Restart => {
                engine.init();
                StatusLine::new("New game")
            }
            GameCommand::Continue => {
                engine.continue_game();
                StatusLine::new("Keep going")
            }
            GameCommand::Revive => match engine.revive_with_removed() {
                Some(removed) => {
                    StatusLine::new(format!("Revived, cleared {} tiles", removed.len()))
                }
                None => StatusLine::new("Revive only works after game over"),
            },
            GameCommand::RemoveMode => {
                mode = Mode::PickRow;
                StatusLine::new("Remove tile: row? (Esc cancels)")
            }
            GameCommand::Quit => return Ok(()),
        };

        session.persist(&engine);
    }
}

/// One step of picking a tile to remove; returns the next mode and a message
fn pick_tile(engine: &mut GridEngine, mode: Mode, key: KeyEvent) -> (Mode, String) {
    if key.code == KeyCode::Esc {
        return (Mode::Play, "Cancelled".to_string());
    }

    let size = engine.board().size();
    match (mode, coordinate_from_key(key, size)) {
        (Mode::PickRow, Some(row)) => {
            (Mode::PickCol(row), format!("Remove tile: row {}, col?", row))
        }
        (Mode::PickCol(row), Some(col)) => {
            if engine.remove_tile(row, col) {
                (Mode::Play, format!("Removed tile at ({}, {})", row, col))
            } else {
                (Mode::Play, format!("No tile at ({}, {})", row, col))
            }
        }
        (current, _) => (current, format!("Enter a digit from 0 to {}", size - 1)),
    }
}
