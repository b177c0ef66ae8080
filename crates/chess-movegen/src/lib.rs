//! Bitboard chess position model and legal move generator.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit board representation with efficient operations
//! - [`Position`] - full game state: piece bitboards, mailbox, castling
//!   rights, en passant, Zobrist hash, and a snapshot stack for unmake
//! - Legal move generation driven by check and pin masks, so no
//!   pseudo-legal filtering pass is needed
//! - [`perft`] for validating the generator against reference node counts
//!
//! # Architecture
//!
//! Each piece type/color combination has a 64-bit integer where each bit
//! represents a square. Leaper attacks come from compile-time tables;
//! slider attacks are computed with the Hyperbola-Quintessence identity
//! over file, rank and diagonal masks. Before moves are emitted, the
//! generator analyzes checks and absolute pins around the king of the side
//! to move and restricts every destination set accordingly, which makes
//! every generated move legal by construction.
//!
//! # Example
//!
//! ```
//! use chess_movegen::Position;
//!
//! let mut position = Position::startpos();
//! let moves = position.legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let e4 = moves
//!     .as_slice()
//!     .iter()
//!     .copied()
//!     .find(|m| m.to_uci() == "e2e4")
//!     .unwrap();
//! position.make(e4);
//! assert!(!position.is_check());
//! position.unmake();
//! assert_eq!(position.hash_key(), Position::startpos().hash_key());
//! ```

mod bitboard;
pub mod movegen;
mod position;
mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    bishop_attacks, generate_moves, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks, squares_between, MoveList,
};
pub use position::{CastlingRights, IllegalMove, Position};
