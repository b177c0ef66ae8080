//! Core types for chess.
//!
//! This crate provides the fundamental types used across the move
//! generator:
//! - [`Piece`], [`ColoredPiece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - FEN parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{ColoredPiece, Piece};
pub use square::{File, Rank, Square};
