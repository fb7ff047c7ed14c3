//! Positional move notation for the history log.
//!
//! Format: `<piece letter><from>-<to>`, e.g. `Ng1-f3`, `Ke1-g1`. Pawns carry
//! no letter (`e2-e4`). There is no capture marker, no check or mate suffix
//! and no disambiguation.

use crate::engine::types::{Piece, Square};

/// History entry recorded when the stalemate demo position is loaded.
pub const STALEMATE_SETUP_ENTRY: &str = "Stalemate position set up by the 'stalemate' command";

/// Render a move made by `piece`.
pub fn move_notation(piece: Piece, from: Square, to: Square) -> String {
    let mut s = String::with_capacity(6);
    if let Some(letter) = piece.kind.notation_letter() {
        s.push(letter);
    }
    s.push_str(&from.to_algebraic());
    s.push('-');
    s.push_str(&to.to_algebraic());
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Color, PieceType};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn pawn_moves_have_no_letter() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        assert_eq!(move_notation(pawn, sq("e2"), sq("e4")), "e2-e4");
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        assert_eq!(move_notation(pawn, sq("d4"), sq("c3")), "d4-c3");
    }

    #[test]
    fn pieces_use_uppercase_letter_for_both_colors() {
        let knight = Piece::new(PieceType::Knight, Color::White);
        assert_eq!(move_notation(knight, sq("g1"), sq("f3")), "Ng1-f3");
        let queen = Piece::new(PieceType::Queen, Color::Black);
        assert_eq!(move_notation(queen, sq("d8"), sq("h4")), "Qd8-h4");
        let king = Piece::new(PieceType::King, Color::White);
        assert_eq!(move_notation(king, sq("e1"), sq("g1")), "Ke1-g1");
    }
}
