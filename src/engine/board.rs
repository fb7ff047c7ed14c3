//! Mailbox board representation and move application.
//!
//! `Placement` is the bare 8×8 grid of optional pieces. `Board` wraps it with
//! side to move, the en-passant target, castling bookkeeping and the move
//! history, and is the single entry point for playing moves.

use std::fmt;

use tracing::{debug, info, warn};

use crate::engine::movegen;
use crate::engine::notation;
use crate::engine::rules;
use crate::engine::types::{CastlingRights, Color, GameStatus, Piece, PieceType, Square};

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// An 8×8 grid holding at most one piece per square, indexed `[row][col]`
/// with row 0 = rank 8.
///
/// `Copy`, so a scratch placement for trying out a move is a plain copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    squares: [[Option<Piece>; 8]; 8],
}

impl Placement {
    /// A grid with no pieces.
    pub const EMPTY: Placement = Placement {
        squares: [[None; 8]; 8],
    };

    /// Standard starting position.
    pub fn starting() -> Self {
        let mut p = Placement::EMPTY;
        for (col, kind) in PieceType::BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                p.set(Square::new(color.back_row(), col), Some(Piece::new(kind, color)));
                p.set(
                    Square::new(color.pawn_row(), col),
                    Some(Piece::new(PieceType::Pawn, color)),
                );
            }
        }
        p
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Remove and return whatever stands on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize].take()
    }

    /// All occupied squares, rank 8 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// All squares holding a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Square of the first king of `color` found scanning from rank 8.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceType::King)
            .map(|(sq, _)| sq)
    }

    /// Is the king of `color` attacked? A missing king counts as not in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => rules::is_square_attacked(self, king, !color),
            None => false,
        }
    }

    /// Relocate the piece on `from` to `to`, applying the rook hop of a
    /// castling move and removing a pawn captured en passant.
    ///
    /// Performs no legality checks. `en_passant` is the target square in
    /// force before the move.
    pub fn apply_move(&mut self, en_passant: Option<Square>, from: Square, to: Square) {
        let Some(piece) = self.take(from) else {
            return;
        };

        if rules::is_castling_move(piece, from, to) {
            let (rook_from, rook_to) = rules::castling_rook_squares(from, to);
            let rook = self.take(rook_from);
            self.set(rook_to, rook);
        }

        if piece.kind == PieceType::Pawn
            && from.col != to.col
            && self.get(to).is_none()
            && en_passant == Some(to)
        {
            let victim_row = to.row as i8 - piece.color.forward();
            self.set(Square::new(victim_row as u8, to.col), None);
        }

        self.set(to, Some(piece));
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a move was refused. Only ever logged: callers of
/// [`Board::move_piece`] just see `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("it is {0}'s turn")]
    WrongTurn(Color),

    #[error("source and destination are the same square")]
    NullMove,

    #[error("destination holds a piece of the mover's colour")]
    OwnPieceOnTarget,

    #[error("{0} cannot move that way")]
    IllegalGeometry(PieceType),

    #[error("move leaves the {0} king in check")]
    LeavesKingInCheck(Color),
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Full game state for one game of chess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    placement: Placement,

    /// Whose turn it is.
    side_to_move: Color,

    /// Square skipped by a pawn double step on the previous ply.
    en_passant: Option<Square>,

    /// Castling bookkeeping; not read by move validation.
    castling_rights: CastlingRights,

    /// One notation string per accepted move, plus setup entries.
    move_history: Vec<String>,
}

impl Board {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Board {
            placement: Placement::starting(),
            side_to_move: Color::White,
            en_passant: None,
            castling_rights: CastlingRights::ALL,
            move_history: Vec::new(),
        }
    }

    /// A board with no pieces and no castling flags. Useful for setting up
    /// test positions with [`Board::put_piece`].
    pub fn empty(side_to_move: Color) -> Self {
        Board {
            placement: Placement::EMPTY,
            side_to_move,
            en_passant: None,
            castling_rights: CastlingRights::NONE,
            move_history: Vec::new(),
        }
    }

    /// Overwrite one square. Setup only: bypasses every rule.
    pub fn put_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.placement.set(sq, piece);
    }

    /// Debug/demo entry point, not a rule of play: replace the position with
    /// black king h8, white king f7, white queen g6, Black to move, and log a
    /// setup entry in the history.
    pub fn setup_stalemate(&mut self) {
        let mut p = Placement::EMPTY;
        p.set(Square::new(0, 7), Some(Piece::new(PieceType::King, Color::Black)));
        p.set(Square::new(1, 5), Some(Piece::new(PieceType::King, Color::White)));
        p.set(Square::new(2, 6), Some(Piece::new(PieceType::Queen, Color::White)));

        self.placement = p;
        self.side_to_move = Color::Black;
        self.en_passant = None;
        self.castling_rights = CastlingRights::NONE;
        self.move_history
            .push(notation::STALEMATE_SETUP_ENTRY.to_string());
        info!("stalemate position set up");
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.placement.get(sq)
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn is_white_turn(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Notation of every accepted move, oldest first.
    #[inline]
    pub fn move_history(&self) -> &[String] {
        &self.move_history
    }

    // -----------------------------------------------------------------
    // Moving
    // -----------------------------------------------------------------

    /// Play `from -> to` for the side to move.
    ///
    /// Returns `false` and leaves the board untouched if the move is illegal
    /// for any reason. On success the piece is relocated (with castling and
    /// en-passant side effects), the turn passes and the move is recorded.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        let piece = match self.validate(from, to) {
            Ok(piece) => piece,
            Err(reason) => {
                debug!(%from, %to, %reason, "move rejected");
                return false;
            }
        };

        self.placement.apply_move(self.en_passant, from, to);

        self.en_passant = if piece.kind == PieceType::Pawn && from.row.abs_diff(to.row) == 2 {
            Some(Square::new((from.row + to.row) / 2, from.col))
        } else {
            None
        };
        self.castling_rights.update(piece, from, to);
        self.side_to_move = !self.side_to_move;

        let record = notation::move_notation(piece, from, to);
        debug!(notation = %record, "move accepted");
        self.move_history.push(record);
        true
    }

    /// Full legality check for `from -> to` without touching the board.
    ///
    /// The self-check test plays the move on a scratch copy of the placement.
    pub(crate) fn validate(&self, from: Square, to: Square) -> Result<Piece, Rejection> {
        let piece = self.placement.get(from).ok_or(Rejection::NoPiece(from))?;
        if piece.color != self.side_to_move {
            return Err(Rejection::WrongTurn(self.side_to_move));
        }
        if from == to {
            return Err(Rejection::NullMove);
        }
        // The castling destination is empty when legal; the geometry check
        // below covers it.
        if !rules::is_castling_move(piece, from, to)
            && let Some(target) = self.placement.get(to)
            && target.color == piece.color
        {
            return Err(Rejection::OwnPieceOnTarget);
        }
        if !rules::is_valid_move(&self.placement, self.en_passant, from, to) {
            return Err(Rejection::IllegalGeometry(piece.kind));
        }

        let mut scratch = self.placement;
        scratch.apply_move(self.en_passant, from, to);
        if scratch.is_in_check(piece.color) {
            return Err(Rejection::LeavesKingInCheck(piece.color));
        }

        Ok(piece)
    }

    // -----------------------------------------------------------------
    // Check / checkmate / stalemate
    // -----------------------------------------------------------------

    /// Is the king of `color` attacked? A board without that king is never
    /// in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        if self.placement.king_square(color).is_none() {
            warn!(%color, "no king on the board; treating as not in check");
            return false;
        }
        self.placement.is_in_check(color)
    }

    /// Is the side to move in check?
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Does the side to move have at least one legal move?
    pub fn has_legal_moves(&self) -> bool {
        movegen::has_legal_moves(self)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    /// Check, mate and stalemate folded into one value.
    pub fn status(&self) -> GameStatus {
        let in_check = self.is_check();
        match (in_check, self.has_legal_moves()) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Active,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8u8 {
            let rank = 8 - row;
            write!(f, "{rank} ")?;
            for col in 0..8u8 {
                let ch = match self.placement.get(Square::new(row, col)) {
                    Some(p) => p.symbol(),
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f, "{rank}")?;
        }
        write!(f, "  a b c d e f g h")
    }
}

// =========================================================================
// Tests
// =========================================================================
