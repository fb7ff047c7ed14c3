//! Game session wrapping a `Board`.
//!
//! `Game` owns the board for one game, tracks the status after each move and
//! refuses moves once the game has ended. It is the type the command-line
//! turn loop drives.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::engine::board::Board;
use crate::engine::movegen::{self, Move};
use crate::engine::types::{ChessError, Color, GameStatus, Square};

// =========================================================================
// Command
// =========================================================================

/// One line of turn-loop input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `"e2 e4"`: move the piece on the first square to the second.
    Move { from: Square, to: Square },
    /// `"stalemate"`: load the stalemate demo position.
    Stalemate,
    /// `"exit"`: end the session.
    Exit,
}

impl Command {
    /// Parse a command line. Keywords are case-insensitive; surrounding
    /// whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ChessError> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            return Ok(Command::Exit);
        }
        if input.eq_ignore_ascii_case("stalemate") {
            return Ok(Command::Stalemate);
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let [from, to] = parts.as_slice() else {
            return Err(ChessError::InvalidCommand(input.to_string()));
        };
        Ok(Command::Move {
            from: parse_square(from)?,
            to: parse_square(to)?,
        })
    }
}

fn parse_square(s: &str) -> Result<Square, ChessError> {
    Square::from_algebraic(s).ok_or_else(|| ChessError::InvalidSquare(s.to_string()))
}

// =========================================================================
// Game
// =========================================================================

/// A single game of chess from the starting position.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Game {
    /// Create a new game from the standard starting position.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Active,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status of the side to move, as of the last accepted move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Recorded notation, oldest first.
    pub fn history(&self) -> &[String] {
        self.board.move_history()
    }

    /// All legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(&self.board)
    }

    // -----------------------------------------------------------------
    // Playing
    // -----------------------------------------------------------------

    /// Play a move and return the resulting status.
    pub fn play(&mut self, from: Square, to: Square) -> Result<GameStatus, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status));
        }
        if !self.board.move_piece(from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        self.status = self.board.status();
        if self.status.is_game_over() {
            info!(
                status = %self.status,
                moves = self.board.move_history().len(),
                "game over"
            );
        }
        Ok(self.status)
    }

    /// Debug/demo entry point: load the stalemate position.
    pub fn setup_stalemate(&mut self) -> GameStatus {
        self.board.setup_stalemate();
        self.status = self.board.status();
        self.status
    }

    // -----------------------------------------------------------------
    // History output
    // -----------------------------------------------------------------

    /// Write the history, one entry per line.
    pub fn write_history<W: Write>(&self, mut out: W) -> Result<(), ChessError> {
        for entry in self.board.move_history() {
            writeln!(out, "{entry}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the history to `path`, replacing any existing file.
    pub fn save_history(&self, path: &Path) -> Result<(), ChessError> {
        let file = File::create(path)?;
        self.write_history(BufWriter::new(file))?;
        info!(
            path = %path.display(),
            entries = self.board.move_history().len(),
            "history saved"
        );
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
