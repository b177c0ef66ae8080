//! Chess piece representation.

use crate::Color;
use std::fmt;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Creates a piece type from index (0-5).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Piece::Pawn),
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            5 => Some(Piece::King),
            _ => None,
        }
    }

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece together with its color, as stored on the board.
///
/// Encoded as `6 * color + piece`, so White pieces occupy indices 0-5 and
/// Black pieces 6-11. The encoding is relied on by piece bitboard indexing
/// and the Zobrist key table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPiece(u8);

impl ColoredPiece {
    /// Number of distinct colored pieces.
    pub const COUNT: usize = 12;

    /// Creates a colored piece from its parts.
    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        ColoredPiece(color.index() as u8 * 6 + piece.index() as u8)
    }

    /// Creates a colored piece from index (0-11).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < Self::COUNT as u8 {
            Some(ColoredPiece(index))
        } else {
            None
        }
    }

    /// Returns the index (0-11).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the piece type.
    #[inline]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(self.0 % 6) {
            Some(piece) => piece,
            None => unreachable!(),
        }
    }

    /// Returns the color.
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 < 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Parses a FEN piece character (uppercase White, lowercase Black).
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some(ColoredPiece::new(color, piece))
    }

    /// Returns the FEN character for this piece.
    pub const fn to_fen_char(self) -> char {
        let c = match self.piece() {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl fmt::Debug for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColoredPiece({})", self.to_fen_char())
    }
}

impl fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
