//! Chess position representation.

use chess_core::{Color, ColoredPiece, FenError, FenParser, Move, Piece, Rank, Square};
use thiserror::Error;

use crate::movegen::{
    bishop_attacks, generate_moves, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
    MoveList,
};
use crate::zobrist::ZOBRIST;
use crate::Bitboard;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Error returned by [`Position::try_make`] for a move that is not legal
/// in the current position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("illegal move {0}")]
pub struct IllegalMove(pub Move);

/// Snapshot of everything a move can change, kept for unmake.
#[derive(Debug, Clone)]
struct State {
    piece_bb: [Bitboard; 12],
    mailbox: [Option<ColoredPiece>; 64],
    side_to_move: Color,
    ep_square: Option<Square>,
    castling: CastlingRights,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash_key: u64,
}

/// Complete chess position state.
///
/// The board is kept redundantly as twelve piece bitboards and a
/// square-indexed mailbox; the two always agree. Mutation happens only
/// through [`make`](Position::make) and [`unmake`](Position::unmake),
/// which push and pop full snapshots.
#[derive(Debug, Clone)]
pub struct Position {
    /// Bitboards indexed by [`ColoredPiece`] index.
    piece_bb: [Bitboard; 12],
    /// Piece on each square.
    mailbox: [Option<ColoredPiece>; 64],
    /// The side to move.
    side_to_move: Color,
    /// En passant target square, if any.
    ep_square: Option<Square>,
    /// Castling rights.
    castling: CastlingRights,
    /// Halfmove clock, carried but never interpreted here.
    halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    fullmove_number: u32,
    /// Zobrist hash of the current position.
    hash_key: u64,
    /// Snapshots of prior states, one per made move.
    undo_stack: Vec<State>,
    /// Hash keys of prior positions, indexed by ply.
    history: Vec<u64>,
}

impl Position {
    /// Typical search depth the undo stack and hash history are sized for.
    const STACK_CAPACITY: usize = 1024;

    fn empty() -> Self {
        Position {
            piece_bb: [Bitboard::EMPTY; 12],
            mailbox: [None; 64],
            side_to_move: Color::White,
            ep_square: None,
            castling: CastlingRights::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash_key: 0,
            undo_stack: Vec::with_capacity(Self::STACK_CAPACITY),
            history: Vec::with_capacity(Self::STACK_CAPACITY),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// The halfmove clock and fullmove number fields are optional. Castling
    /// rights whose king or rook is not on its home square are cleared, as
    /// is an en passant square with no matching pawn behind it.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        // Piece placement, from rank 8 down
        let ranks: Vec<&str> = parsed.piece_placement.split('/').collect();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else if let Some(piece) = ColoredPiece::from_fen_char(c) {
                    let sq = unsafe { Square::from_index_unchecked((rank * 8 + file) as u8) };
                    position.place_piece(piece, sq);
                    file += 1;
                }
            }
        }

        position.side_to_move = match parsed.active_color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => unreachable!("FEN parser validated this"),
        };

        let mut castling = 0u8;
        for c in parsed.castling.chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        position.castling = CastlingRights::new(castling);

        position.ep_square = if parsed.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&parsed.en_passant)
        };

        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        position.validate()?;
        position.normalize_castling_rights();
        position.normalize_ep_square();
        position.hash_key = position.compute_hash();

        Ok(position)
    }

    fn validate(&self) -> Result<(), FenError> {
        for color in Color::ALL {
            let kings = self.pieces_of(Piece::King, color).count();
            if kings != 1 {
                return Err(FenError::InconsistentPosition(format!(
                    "{} has {} kings",
                    color, kings
                )));
            }
        }

        let pawns =
            self.pieces_of(Piece::Pawn, Color::White) | self.pieces_of(Piece::Pawn, Color::Black);
        if (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_not_empty() {
            return Err(FenError::InconsistentPosition(
                "pawn on a back rank".to_string(),
            ));
        }

        Ok(())
    }

    /// Clears castling-right bits whose king or rook is off its home square.
    fn normalize_castling_rights(&mut self) {
        let white_king = ColoredPiece::new(Color::White, Piece::King);
        let white_rook = ColoredPiece::new(Color::White, Piece::Rook);
        if self.piece_at(Square::E1) != Some(white_king) {
            self.castling.remove_color(Color::White);
        } else {
            if self.piece_at(Square::H1) != Some(white_rook) {
                self.castling.remove_kingside(Color::White);
            }
            if self.piece_at(Square::A1) != Some(white_rook) {
                self.castling.remove_queenside(Color::White);
            }
        }

        let black_king = ColoredPiece::new(Color::Black, Piece::King);
        let black_rook = ColoredPiece::new(Color::Black, Piece::Rook);
        if self.piece_at(Square::E8) != Some(black_king) {
            self.castling.remove_color(Color::Black);
        } else {
            if self.piece_at(Square::H8) != Some(black_rook) {
                self.castling.remove_kingside(Color::Black);
            }
            if self.piece_at(Square::A8) != Some(black_rook) {
                self.castling.remove_queenside(Color::Black);
            }
        }
    }

    /// Clears an en passant square that no double push could have produced.
    fn normalize_ep_square(&mut self) {
        if let Some(ep) = self.ep_square {
            let mover = self.side_to_move.opposite();
            let expected_rank = match mover {
                Color::White => Rank::R3,
                Color::Black => Rank::R6,
            };
            let valid = ep.rank() == expected_rank && {
                let pawn_sq = unsafe {
                    Square::from_index_unchecked((ep.index() as i8 + mover.push_offset()) as u8)
                };
                self.piece_at(pawn_sq) == Some(ColoredPiece::new(mover, Piece::Pawn))
            };
            if !valid {
                self.ep_square = None;
            }
        }
    }

    #[inline]
    fn place_piece(&mut self, piece: ColoredPiece, sq: Square) {
        self.piece_bb[piece.index()].set(sq);
        self.mailbox[sq.index() as usize] = Some(piece);
    }

    #[inline]
    fn remove_piece(&mut self, sq: Square) {
        if let Some(piece) = self.mailbox[sq.index() as usize].take() {
            self.piece_bb[piece.index()].clear(sq);
        }
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.mailbox[sq.index() as usize]
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.piece_bb[ColoredPiece::new(color, piece).index()]
    }

    /// Returns a bitboard of all pieces of the given color.
    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        let base = color.index() * 6;
        self.piece_bb[base]
            | self.piece_bb[base + 1]
            | self.piece_bb[base + 2]
            | self.piece_bb[base + 3]
            | self.piece_bb[base + 4]
            | self.piece_bb[base + 5]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.color_occupancy(Color::White) | self.color_occupancy(Color::Black)
    }

    /// Returns the square of the given color's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match self.pieces_of(Piece::King, color).lsb() {
            Some(index) => unsafe { Square::from_index_unchecked(index) },
            None => unreachable!("position without a king"),
        }
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the en passant target square, if any.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the Zobrist hash of the current position.
    #[inline]
    pub fn hash_key(&self) -> u64 {
        self.hash_key
    }

    /// Returns the hash keys of all prior positions, indexed by ply.
    #[inline]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Returns the number of moves made and not yet unmade.
    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns true iff any piece of `by` attacks `sq` under the current
    /// occupancy.
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_with_occupancy(sq, by, self.occupied())
    }

    /// Attack query against an explicit occupancy, so callers can look
    /// "through" squares they are about to vacate.
    pub(crate) fn attacked_with_occupancy(&self, sq: Square, by: Color, occ: Bitboard) -> bool {
        if (pawn_attacks(sq, by.opposite()) & self.pieces_of(Piece::Pawn, by)).is_not_empty() {
            return true;
        }
        if (knight_attacks(sq) & self.pieces_of(Piece::Knight, by)).is_not_empty() {
            return true;
        }
        if (king_attacks(sq) & self.pieces_of(Piece::King, by)).is_not_empty() {
            return true;
        }

        let queens = self.pieces_of(Piece::Queen, by);
        if (bishop_attacks(sq, occ) & (self.pieces_of(Piece::Bishop, by) | queens)).is_not_empty() {
            return true;
        }
        (rook_attacks(sq, occ) & (self.pieces_of(Piece::Rook, by) | queens)).is_not_empty()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_attacked(self.king_square(us), us.opposite())
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Generates all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        generate_moves(self)
    }

    /// Applies a legal move.
    ///
    /// The move must come from [`legal_moves`](Position::legal_moves);
    /// use [`try_make`](Position::try_make) to validate first.
    pub fn make(&mut self, mv: Move) {
        self.undo_stack.push(self.snapshot());
        self.history.push(self.hash_key);

        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        if mv.is_castling() {
            let rook = ColoredPiece::new(us, Piece::Rook);
            let (rook_from, rook_to) = if to == Square::G1 {
                (Square::H1, Square::F1)
            } else if to == Square::C1 {
                (Square::A1, Square::D1)
            } else if to == Square::G8 {
                (Square::H8, Square::F8)
            } else {
                (Square::A8, Square::D8)
            };
            self.remove_piece(from);
            self.remove_piece(rook_from);
            self.place_piece(piece, to);
            self.place_piece(rook, rook_to);
        } else {
            if mv.is_en_passant() {
                // The captured pawn sits one push behind the target square
                let captured = unsafe {
                    Square::from_index_unchecked((to.index() as i8 - us.push_offset()) as u8)
                };
                self.remove_piece(captured);
            } else if mv.is_capture() {
                self.remove_piece(to);
            }
            self.remove_piece(from);
            match mv.promoted() {
                Some(promoted) => self.place_piece(promoted, to),
                None => self.place_piece(piece, to),
            }
        }

        // Castling rights only ever lose bits: a king move clears both of
        // the mover's bits, and any move into or out of a rook home square
        // clears that wing.
        if piece.piece() == Piece::King {
            self.castling.remove_color(us);
        }
        for sq in [from, to] {
            if sq == Square::A1 {
                self.castling.remove_queenside(Color::White);
            } else if sq == Square::H1 {
                self.castling.remove_kingside(Color::White);
            } else if sq == Square::A8 {
                self.castling.remove_queenside(Color::Black);
            } else if sq == Square::H8 {
                self.castling.remove_kingside(Color::Black);
            }
        }

        // Record a new en passant square only when some enemy pawn could
        // actually capture on it, which keeps the hash canonical.
        self.ep_square = None;
        if mv.is_double_push() {
            let crossed = unsafe {
                Square::from_index_unchecked((to.index() as i8 - us.push_offset()) as u8)
            };
            if (pawn_attacks(crossed, us) & self.pieces_of(Piece::Pawn, them)).is_not_empty() {
                self.ep_square = Some(crossed);
            }
        }

        if piece.piece() == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
        self.hash_key = self.compute_hash();
    }

    /// Applies a move after checking it is legal.
    pub fn try_make(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if self.legal_moves().as_slice().contains(&mv) {
            self.make(mv);
            Ok(())
        } else {
            Err(IllegalMove(mv))
        }
    }

    /// Reverts the most recent [`make`](Position::make).
    pub fn unmake(&mut self) {
        debug_assert!(
            !self.undo_stack.is_empty(),
            "unmake without a matching make"
        );
        if let Some(prev) = self.undo_stack.pop() {
            self.piece_bb = prev.piece_bb;
            self.mailbox = prev.mailbox;
            self.side_to_move = prev.side_to_move;
            self.ep_square = prev.ep_square;
            self.castling = prev.castling;
            self.halfmove_clock = prev.halfmove_clock;
            self.fullmove_number = prev.fullmove_number;
            self.hash_key = prev.hash_key;
            self.history.pop();
        }
    }

    fn snapshot(&self) -> State {
        State {
            piece_bb: self.piece_bb,
            mailbox: self.mailbox,
            side_to_move: self.side_to_move,
            ep_square: self.ep_square,
            castling: self.castling,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash_key: self.hash_key,
        }
    }

    /// Computes the Zobrist hash of the current position from scratch.
    fn compute_hash(&self) -> u64 {
        let mut key = 0u64;

        let mut occupied = self.occupied();
        while let Some(sq) = occupied.pop_lsb() {
            if let Some(piece) = self.piece_at(sq) {
                key ^= ZOBRIST.piece_key(piece, sq);
            }
        }

        // The en passant file is hashed only when the square is actually
        // capturable; an unusable square must not change the fingerprint.
        if let Some(ep) = self.ep_square {
            let mover = self.side_to_move.opposite();
            let capturers = pawn_attacks(ep, mover) & self.pieces_of(Piece::Pawn, self.side_to_move);
            if capturers.is_not_empty() {
                key ^= ZOBRIST.en_passant_key(ep.file());
            }
        }

        key ^= ZOBRIST.castling_key(self.castling.raw());
        if self.side_to_move == Color::White {
            key ^= ZOBRIST.side_key();
        }

        key
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
