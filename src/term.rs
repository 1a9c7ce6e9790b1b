//! Plain-text terminal view.
//!
//! `GameView` turns the engine state into lines of text; `TerminalRenderer`
//! owns raw mode and the alternate screen and repaints those lines.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, style::Print, terminal, QueueableCommand};

use crate::core::{GridEngine, MoveResult};

/// What the last command did, shown under the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
}

impl StatusLine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Describe a move outcome
    pub fn from_move(result: &MoveResult, win_value: u32) -> Self {
        if !result.moved {
            return Self::new(if result.game_over {
                "Game over. v revive, u undo, r restart"
            } else {
                "Nothing moved"
            });
        }

        let mut message = format!(
            "slid {}, merged {}",
            result.mapping.sliding_moves().count(),
            result.mapping.merges.len()
        );
        if result.score_delta > 0 {
            message.push_str(&format!(", +{}", result.score_delta));
        }
        if let Some(tile) = result.new_tile {
            message.push_str(&format!(
                ", new {} at ({}, {})",
                tile.value, tile.position.row, tile.position.col
            ));
        }
        if result.won {
            message = format!("You reached {}! c to keep going. {}", win_value, message);
        } else if result.game_over {
            message = format!("Game over. v revive, u undo, r restart. {}", message);
        }
        Self { message }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn render(&self, engine: &GridEngine, status: &StatusLine) -> Vec<String> {
        let mut lines = Vec::with_capacity(engine.board().size() * 2 + 6);
        lines.push(format!(
            "2048   score {:>7}   best {:>7}",
            engine.score(),
            engine.best_score()
        ));
        lines.push(String::new());
        lines.extend(engine.board().to_string().lines().map(str::to_string));
        lines.push(String::new());
        lines.push(status.message.clone());
        lines.push(
            "arrows/wasd/hjkl move  u undo  r restart  c continue  v revive  x remove  q quit"
                .to_string(),
        );
        lines
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint the whole screen
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        for line in lines {
            // Raw mode: explicit carriage return
            self.buf.queue(Print(line))?;
            self.buf.queue(Print("\r\n"))?;
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
