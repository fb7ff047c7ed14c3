//! Legal move enumeration.
//!
//! Every candidate `(from, to)` pair for the side to move is run through the
//! same validation `Board::move_piece` uses, so anything listed here is
//! accepted by `move_piece` and vice versa.

use std::fmt;

use crate::engine::board::Board;
use crate::engine::types::Square;

// =========================================================================
// Move
// =========================================================================

/// A move as the board understands it: source and destination only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

// =========================================================================
// Public API
// =========================================================================

/// All legal moves for the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    candidates(board)
        .filter(|mv| board.validate(mv.from, mv.to).is_ok())
        .collect()
}

/// Legal moves for the piece standing on `from`.
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<Move> {
    Square::all()
        .map(|to| Move::new(from, to))
        .filter(|mv| board.validate(mv.from, mv.to).is_ok())
        .collect()
}

/// Whether the side to move has any legal move. Stops at the first one found.
pub fn has_legal_moves(board: &Board) -> bool {
    candidates(board).any(|mv| board.validate(mv.from, mv.to).is_ok())
}

// =========================================================================
// Candidate generation (internal)
// =========================================================================

/// Every pairing of a piece of the side to move with a destination square.
fn candidates(board: &Board) -> impl Iterator<Item = Move> + '_ {
    board
        .placement()
        .pieces_of(board.side_to_move())
        .flat_map(|(from, _)| Square::all().map(move |to| Move::new(from, to)))
}

// =========================================================================
// Tests
// =========================================================================
