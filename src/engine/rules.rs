//! Piece movement predicates and attack detection.
//!
//! Every predicate is a pure function of a [`Placement`] (plus the en-passant
//! target where pawns need it). None of them look at whose turn it is or at
//! whether the mover's own king ends up in check; those checks belong to
//! [`Board`](crate::engine::board::Board).

use crate::engine::board::Placement;
use crate::engine::types::{Color, Piece, PieceType, Square};

// =========================================================================
// Public API
// =========================================================================

/// Whether the piece standing on `from` may geometrically move to `to`.
///
/// Covers piece-specific geometry, path obstruction, capture rules,
/// en passant and castling. Returns `false` when `from` is empty.
pub fn is_valid_move(
    placement: &Placement,
    en_passant: Option<Square>,
    from: Square,
    to: Square,
) -> bool {
    let Some(piece) = placement.get(from) else {
        return false;
    };
    let (dr, dc) = delta(from, to);

    match piece.kind {
        PieceType::Pawn => pawn_move(placement, en_passant, piece.color, from, to),
        PieceType::Knight => {
            !holds_own(placement, to, piece.color) && is_knight_jump(dr, dc)
        }
        PieceType::Bishop => {
            !holds_own(placement, to, piece.color)
                && dr.abs() == dc.abs()
                && path_clear(placement, from, to)
        }
        PieceType::Rook => {
            !holds_own(placement, to, piece.color)
                && (dr == 0 || dc == 0)
                && path_clear(placement, from, to)
        }
        PieceType::Queen => {
            !holds_own(placement, to, piece.color)
                && (dr == 0 || dc == 0 || dr.abs() == dc.abs())
                && path_clear(placement, from, to)
        }
        PieceType::King => {
            if dr.abs() <= 1 && dc.abs() <= 1 {
                !holds_own(placement, to, piece.color)
            } else if dr == 0 && dc.abs() == 2 {
                can_castle(placement, piece, from, to)
            } else {
                false
            }
        }
    }
}

/// Whether the piece on `from` attacks `to`.
///
/// Unlike [`is_valid_move`], pawns attack both forward diagonals whatever
/// stands there, pawn pushes attack nothing, and a king attacks only its
/// neighbours. The colour of any piece on `to` is ignored.
pub fn attacks(placement: &Placement, from: Square, to: Square) -> bool {
    let Some(piece) = placement.get(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    let (dr, dc) = delta(from, to);

    match piece.kind {
        PieceType::Pawn => dr == piece.color.forward() && dc.abs() == 1,
        PieceType::Knight => is_knight_jump(dr, dc),
        PieceType::Bishop => dr.abs() == dc.abs() && path_clear(placement, from, to),
        PieceType::Rook => (dr == 0 || dc == 0) && path_clear(placement, from, to),
        PieceType::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_clear(placement, from, to)
        }
        PieceType::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

/// Is `sq` attacked by any piece of colour `by`?
pub fn is_square_attacked(placement: &Placement, sq: Square, by: Color) -> bool {
    placement
        .pieces_of(by)
        .any(|(from, _)| attacks(placement, from, sq))
}

/// Whether every square strictly between `from` and `to` is empty.
///
/// Steps by the sign of each delta, so it is only meaningful for moves along
/// a rank, file or diagonal.
pub fn path_clear(placement: &Placement, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let steps = dr.abs().max(dc.abs());

    (1..steps).all(|i| {
        Square::checked(from.row as i8 + i * step_r, from.col as i8 + i * step_c)
            .is_some_and(|sq| placement.get(sq).is_none())
    })
}

/// Whether `from -> to` is a king's castling move: two files along a rank.
#[inline]
pub fn is_castling_move(piece: Piece, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    piece.kind == PieceType::King && dr == 0 && dc.abs() == 2
}

/// Where the rook goes for a castling king landing on `king_to`:
/// `(rook_from, rook_to)`.
pub fn castling_rook_squares(from: Square, king_to: Square) -> (Square, Square) {
    if king_to.col > from.col {
        (Square::new(from.row, 7), Square::new(from.row, 5))
    } else {
        (Square::new(from.row, 0), Square::new(from.row, 3))
    }
}

// =========================================================================
// Per-piece helpers (internal)
// =========================================================================

#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

#[inline]
fn holds_own(placement: &Placement, sq: Square, color: Color) -> bool {
    placement.get(sq).is_some_and(|p| p.color == color)
}

#[inline]
fn is_knight_jump(dr: i8, dc: i8) -> bool {
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

fn pawn_move(
    placement: &Placement,
    en_passant: Option<Square>,
    color: Color,
    from: Square,
    to: Square,
) -> bool {
    let dir = color.forward();
    let (dr, dc) = delta(from, to);

    if dc == 0 {
        if placement.get(to).is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        if from.row == color.pawn_row() && dr == 2 * dir {
            let skipped = Square::new((from.row as i8 + dir) as u8, from.col);
            return placement.get(skipped).is_none();
        }
        return false;
    }

    if dc.abs() == 1 && dr == dir {
        return match placement.get(to) {
            Some(target) => target.color != color,
            None => en_passant == Some(to),
        };
    }

    false
}

/// Castling test, done purely by inspecting the board.
///
/// The king must stand on its home square and the rook in the matching
/// corner. The squares between them must be empty, and the king's origin,
/// transit and destination squares must not be attacked. Castling flags are
/// not consulted.
fn can_castle(placement: &Placement, king: Piece, from: Square, to: Square) -> bool {
    let home = Square::new(king.color.back_row(), 4);
    if from != home {
        return false;
    }

    let dir = (to.col as i8 - from.col as i8).signum();
    let them = !king.color;
    for i in 0..=2 {
        let sq = Square::new(from.row, (from.col as i8 + i * dir) as u8);
        if is_square_attacked(placement, sq, them) {
            return false;
        }
    }

    let (rook_sq, _) = castling_rook_squares(from, to);
    match placement.get(rook_sq) {
        Some(rook) if rook.kind == PieceType::Rook && rook.color == king.color => {}
        _ => return false,
    }

    path_clear(placement, from, rook_sq)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn white(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(kind, Color::White))
    }

    fn black(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(kind, Color::Black))
    }

    fn with(pieces: &[(&str, Option<Piece>)]) -> Placement {
        let mut p = Placement::EMPTY;
        for &(name, piece) in pieces {
            p.set(sq(name), piece);
        }
        p
    }

    fn valid(p: &Placement, from: &str, to: &str) -> bool {
        is_valid_move(p, None, sq(from), sq(to))
    }

    // -------------------------------------------------------------------
    // Pawns
    // -------------------------------------------------------------------

    #[test]
    fn pawn_single_and_double_push() {
        let p = with(&[("e2", white(PieceType::Pawn)), ("d7", black(PieceType::Pawn))]);
        assert!(valid(&p, "e2", "e3"));
        assert!(valid(&p, "e2", "e4"));
        assert!(!valid(&p, "e2", "e5"));
        assert!(valid(&p, "d7", "d6"));
        assert!(valid(&p, "d7", "d5"));
        assert!(!valid(&p, "d7", "d8"));
    }

    #[test]
    fn pawn_never_moves_backwards() {
        let p = with(&[("e4", white(PieceType::Pawn)), ("d5", black(PieceType::Pawn))]);
        assert!(!valid(&p, "e4", "e3"));
        assert!(!valid(&p, "d5", "d6"));
    }

    #[test]
    fn pawn_double_push_only_from_home_row() {
        let p = with(&[("e3", white(PieceType::Pawn))]);
        assert!(valid(&p, "e3", "e4"));
        assert!(!valid(&p, "e3", "e5"));
    }

    #[test]
    fn pawn_push_blocked() {
        let p = with(&[("e2", white(PieceType::Pawn)), ("e3", black(PieceType::Knight))]);
        assert!(!valid(&p, "e2", "e3"));
        assert!(!valid(&p, "e2", "e4"));

        let p = with(&[("e2", white(PieceType::Pawn)), ("e4", black(PieceType::Knight))]);
        assert!(valid(&p, "e2", "e3"));
        assert!(!valid(&p, "e2", "e4"));
    }

    #[test]
    fn pawn_captures_diagonally() {
        let p = with(&[
            ("e4", white(PieceType::Pawn)),
            ("d5", black(PieceType::Pawn)),
            ("f5", white(PieceType::Knight)),
        ]);
        assert!(valid(&p, "e4", "d5"));
        assert!(!valid(&p, "e4", "f5"));
        // Diagonal onto an empty square is not a move without en passant.
        let p = with(&[("e4", white(PieceType::Pawn))]);
        assert!(!valid(&p, "e4", "d5"));
    }

    #[test]
    fn pawn_diagonal_onto_en_passant_target() {
        let p = with(&[("e5", white(PieceType::Pawn)), ("d5", black(PieceType::Pawn))]);
        assert!(is_valid_move(&p, Some(sq("d6")), sq("e5"), sq("d6")));
        assert!(!is_valid_move(&p, Some(sq("f6")), sq("e5"), sq("d6")));
        assert!(!is_valid_move(&p, None, sq("e5"), sq("d6")));
    }

    // -------------------------------------------------------------------
    // Sliders
    // -------------------------------------------------------------------

    #[test]
    fn rook_moves_along_lines() {
        let p = with(&[("a1", white(PieceType::Rook))]);
        assert!(valid(&p, "a1", "a8"));
        assert!(valid(&p, "a1", "h1"));
        assert!(!valid(&p, "a1", "b2"));
    }

    #[test]
    fn rook_blocked_but_can_capture_blocker() {
        let p = with(&[("a1", white(PieceType::Rook)), ("a4", black(PieceType::Pawn))]);
        assert!(valid(&p, "a1", "a4"));
        assert!(!valid(&p, "a1", "a5"));

        let p = with(&[("a1", white(PieceType::Rook)), ("a4", white(PieceType::Pawn))]);
        assert!(!valid(&p, "a1", "a4"));
        assert!(valid(&p, "a1", "a3"));
    }

    #[test]
    fn bishop_moves_diagonally() {
        let p = with(&[("c1", white(PieceType::Bishop)), ("e3", black(PieceType::Pawn))]);
        assert!(valid(&p, "c1", "a3"));
        assert!(valid(&p, "c1", "e3"));
        assert!(!valid(&p, "c1", "f4"));
        assert!(!valid(&p, "c1", "c2"));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let p = with(&[("d4", white(PieceType::Queen))]);
        assert!(valid(&p, "d4", "d8"));
        assert!(valid(&p, "d4", "a4"));
        assert!(valid(&p, "d4", "g7"));
        assert!(valid(&p, "d4", "a1"));
        assert!(!valid(&p, "d4", "e6"));
    }

    #[test]
    fn path_clear_excludes_endpoints() {
        let p = with(&[("a1", white(PieceType::Rook)), ("a8", black(PieceType::Rook))]);
        assert!(path_clear(&p, sq("a1"), sq("a8")));
        let p = with(&[("a1", white(PieceType::Rook)), ("a2", black(PieceType::Pawn))]);
        assert!(path_clear(&p, sq("a1"), sq("a2")));
        assert!(!path_clear(&p, sq("a1"), sq("a3")));
    }

    // -------------------------------------------------------------------
    // Knight and king
    // -------------------------------------------------------------------

    #[test]
    fn knight_jumps_over_pieces() {
        let p = with(&[
            ("g1", white(PieceType::Knight)),
            ("f2", white(PieceType::Pawn)),
            ("g2", white(PieceType::Pawn)),
            ("h2", white(PieceType::Pawn)),
            ("e2", white(PieceType::Pawn)),
        ]);
        assert!(valid(&p, "g1", "f3"));
        assert!(valid(&p, "g1", "h3"));
        assert!(!valid(&p, "g1", "e2"));
        assert!(!valid(&p, "g1", "g3"));
    }

    #[test]
    fn king_steps_one_square() {
        let p = with(&[("e4", white(PieceType::King)), ("e5", black(PieceType::Pawn))]);
        assert!(valid(&p, "e4", "e5"));
        assert!(valid(&p, "e4", "d3"));
        assert!(!valid(&p, "e4", "e6"));
        assert!(!valid(&p, "e4", "g5"));
    }

    #[test]
    fn own_square_is_never_a_valid_target() {
        for kind in PieceType::ALL {
            let p = with(&[("d4", white(kind))]);
            assert!(!valid(&p, "d4", "d4"), "{kind} moved onto itself");
        }
    }

    // -------------------------------------------------------------------
    // Castling
    // -------------------------------------------------------------------

    #[test]
    fn castling_requires_rook_and_clear_path() {
        let p = with(&[
            ("e1", white(PieceType::King)),
            ("h1", white(PieceType::Rook)),
            ("a1", white(PieceType::Rook)),
            ("b1", white(PieceType::Knight)),
        ]);
        assert!(valid(&p, "e1", "g1"));
        assert!(!valid(&p, "e1", "c1"));

        let p = with(&[("e1", white(PieceType::King)), ("h1", black(PieceType::Rook))]);
        assert!(!valid(&p, "e1", "g1"));

        let p = with(&[("e1", white(PieceType::King)), ("h1", white(PieceType::Bishop))]);
        assert!(!valid(&p, "e1", "g1"));
    }

    #[test]
    fn castling_forbidden_through_attacked_square() {
        let p = with(&[
            ("e1", white(PieceType::King)),
            ("h1", white(PieceType::Rook)),
            ("a1", white(PieceType::Rook)),
            ("f8", black(PieceType::Rook)),
        ]);
        assert!(!valid(&p, "e1", "g1"));
        assert!(valid(&p, "e1", "c1"));
    }

    #[test]
    fn castling_forbidden_out_of_check() {
        let p = with(&[
            ("e1", white(PieceType::King)),
            ("h1", white(PieceType::Rook)),
            ("e8", black(PieceType::Rook)),
        ]);
        assert!(!valid(&p, "e1", "g1"));
    }

    #[test]
    fn castling_queenside_ignores_attack_on_b_file() {
        let p = with(&[
            ("e8", black(PieceType::King)),
            ("a8", black(PieceType::Rook)),
            ("b1", white(PieceType::Rook)),
        ]);
        assert!(valid(&p, "e8", "c8"));
    }

    #[test]
    fn castling_requires_king_on_home_square() {
        let p = with(&[("d1", white(PieceType::King)), ("h1", white(PieceType::Rook))]);
        assert!(!valid(&p, "d1", "f1"));
    }

    #[test]
    fn pawn_push_does_not_attack_castling_path() {
        let p = with(&[
            ("e1", white(PieceType::King)),
            ("h1", white(PieceType::Rook)),
            ("f2", black(PieceType::Pawn)),
        ]);
        // f2 pawn attacks e1 and g1.
        assert!(!valid(&p, "e1", "g1"));

        let p = with(&[
            ("e1", white(PieceType::King)),
            ("h1", white(PieceType::Rook)),
            ("h3", black(PieceType::Pawn)),
        ]);
        assert!(valid(&p, "e1", "g1"));
    }

    // -------------------------------------------------------------------
    // Attacks
    // -------------------------------------------------------------------

    #[test]
    fn pawn_attacks_empty_diagonals_only() {
        let p = with(&[("e4", white(PieceType::Pawn))]);
        assert!(attacks(&p, sq("e4"), sq("d5")));
        assert!(attacks(&p, sq("e4"), sq("f5")));
        assert!(!attacks(&p, sq("e4"), sq("e5")));
        assert!(!attacks(&p, sq("e4"), sq("d3")));
    }

    #[test]
    fn king_attacks_neighbours_only() {
        let p = with(&[("e1", white(PieceType::King)), ("h1", white(PieceType::Rook))]);
        assert!(attacks(&p, sq("e1"), sq("f1")));
        assert!(!attacks(&p, sq("e1"), sq("g1")));
    }

    #[test]
    fn square_attacked_by_slider_respects_blockers() {
        let p = with(&[("a8", black(PieceType::Queen)), ("d5", white(PieceType::Pawn))]);
        assert!(is_square_attacked(&p, sq("d5"), Color::Black));
        assert!(!is_square_attacked(&p, sq("e4"), Color::Black));
        assert!(is_square_attacked(&p, sq("a1"), Color::Black));
        assert!(!is_square_attacked(&p, sq("a1"), Color::White));
    }

    #[test]
    fn castling_rook_squares_by_wing() {
        assert_eq!(
            castling_rook_squares(sq("e1"), sq("g1")),
            (sq("h1"), sq("f1"))
        );
        assert_eq!(
            castling_rook_squares(sq("e8"), sq("c8")),
            (sq("a8"), sq("d8"))
        );
    }
}
