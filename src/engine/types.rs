use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row step a pawn of this colour advances by (row 0 is rank 8).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row pawns of this colour start on.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row the king and rooks of this colour start on.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceType
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// All piece types in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Back-rank layout from the a-file to the h-file.
    pub const BACK_RANK: [PieceType; 8] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];

    /// Uppercase letter identifying the kind.
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Prefix used in move notation. Pawns have none.
    pub fn notation_letter(self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            other => Some(other.letter()),
        }
    }

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    /// Parse a piece character; the case selects the colour.
    pub fn from_char(c: char) -> Option<(Color, PieceType)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((color, piece))
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "pawn"),
            PieceType::Knight => write!(f, "knight"),
            PieceType::Bishop => write!(f, "bishop"),
            PieceType::Rook => write!(f, "rook"),
            PieceType::Queen => write!(f, "queen"),
            PieceType::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board. Moving a piece relocates this value; it never
/// changes kind or colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Board symbol: uppercase for white, lowercase for black.
    #[inline]
    pub fn symbol(self) -> char {
        self.kind.to_char(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square addressed by grid coordinates: row 0 is rank 8, row 7 is rank 1,
/// column 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const NUM: usize = 64;

    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "square out of range: ({row}, {col})");
        Square { row, col }
    }

    /// Square from signed coordinates, `None` when off the board.
    #[inline]
    pub fn checked(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 squares, rank 8 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::new(row, col)))
    }

    /// File letter, `'a'..='h'`.
    #[inline]
    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number, 1..=8.
    #[inline]
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Mirror across the horizontal centre line (rank 1 <-> rank 8).
    #[inline]
    pub fn flip_vertical(self) -> Self {
        Square::new(7 - self.row, self.col)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if col < 8 && rank < 8 {
            Some(Square::new(7 - rank, col))
        } else {
            None
        }
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank())
    }
}

// ---------------------------------------------------------------------------
// CastlingRights
// ---------------------------------------------------------------------------

/// Castling bookkeeping: eight named flags packed into one byte.
///
/// The `*_KING`/`*_QUEEN` flags mirror the `*_KING_SIDE`/`*_QUEEN_SIDE` pair
/// for the same wing. They are maintained as moves are played but are not
/// consulted when validating a castling move; that check inspects the live
/// board instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 1 << 1;
    pub const WHITE_KING_SIDE: u8 = 1 << 2;
    pub const WHITE_QUEEN_SIDE: u8 = 1 << 3;
    pub const BLACK_KING: u8 = 1 << 4;
    pub const BLACK_QUEEN: u8 = 1 << 5;
    pub const BLACK_KING_SIDE: u8 = 1 << 6;
    pub const BLACK_QUEEN_SIDE: u8 = 1 << 7;
    pub const ALL: CastlingRights = CastlingRights(0xff);

    #[inline]
    pub fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn remove(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Both king-side flags of a colour.
    pub const fn kingside_flags(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING | Self::WHITE_KING_SIDE,
            Color::Black => Self::BLACK_KING | Self::BLACK_KING_SIDE,
        }
    }

    /// Both queen-side flags of a colour.
    pub const fn queenside_flags(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEEN | Self::WHITE_QUEEN_SIDE,
            Color::Black => Self::BLACK_QUEEN | Self::BLACK_QUEEN_SIDE,
        }
    }

    #[inline]
    pub fn can_castle_kingside(self, color: Color) -> bool {
        self.0 & Self::kingside_flags(color) == Self::kingside_flags(color)
    }

    #[inline]
    pub fn can_castle_queenside(self, color: Color) -> bool {
        self.0 & Self::queenside_flags(color) == Self::queenside_flags(color)
    }

    /// Clear the flags invalidated by a piece leaving `from` or landing on `to`.
    pub fn update(&mut self, moved: Piece, from: Square, to: Square) {
        if moved.kind == PieceType::King {
            self.remove(Self::kingside_flags(moved.color) | Self::queenside_flags(moved.color));
        }
        for sq in [from, to] {
            for color in [Color::White, Color::Black] {
                if sq.row != color.back_row() {
                    continue;
                }
                match sq.col {
                    0 => self.remove(Self::queenside_flags(color)),
                    7 => self.remove(Self::kingside_flags(color)),
                    _ => {}
                }
            }
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for (color, letters) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            if self.can_castle_kingside(color) {
                write!(f, "{}", letters[0])?;
                any = true;
            }
            if self.can_castle_queenside(color) {
                write!(f, "{}", letters[1])?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Status of the side to move. `Check` is a transient annotation on an
/// ongoing game; `Checkmate` and `Stalemate` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Errors surfaced by the game session and the command-line front end.
///
/// The board itself only ever answers legal / illegal.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game is already over: {0}")]
    GameOver(GameStatus),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
