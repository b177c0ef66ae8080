//! Sliding piece attacks via Hyperbola Quintessence.
//!
//! Slider attacks along a masked line are produced arithmetically from the
//! occupancy, without blocker-indexed lookup tables:
//!
//! `attacks = ((o - 2s) ^ reverse(reverse(o) - 2 reverse(s))) & mask`
//!
//! where `o` is the occupancy restricted to the line mask and `s` the
//! slider's square bit. The subtraction ripples up to the first blocker in
//! the positive direction; the reversed copy handles the negative
//! direction. Bishops combine the diagonal and antidiagonal lines, rooks
//! the file and rank.

use crate::Bitboard;
use chess_core::Square;

/// Masks for each of the 8 files.
const MASK_FILE: [Bitboard; 8] = compute_file_masks();

/// Masks for each of the 8 ranks.
const MASK_RANK: [Bitboard; 8] = compute_rank_masks();

/// Masks for each of the 15 a1-h8 diagonals.
const MASK_DIAGONAL: [Bitboard; 15] = compute_diagonal_masks();

/// Masks for each of the 15 h1-a8 antidiagonals.
const MASK_ANTI_DIAGONAL: [Bitboard; 15] = compute_anti_diagonal_masks();

/// Computes slider attacks along one masked line.
#[inline]
fn hyperbola(sq: Square, occupancy: Bitboard, mask: Bitboard) -> Bitboard {
    let slider = Bitboard::from_square(sq);
    let line_occ = occupancy & mask;
    let forward = line_occ.0.wrapping_sub(slider.0.wrapping_shl(1));
    let backward = line_occ
        .reverse()
        .0
        .wrapping_sub(slider.reverse().0.wrapping_shl(1));
    Bitboard((forward ^ Bitboard(backward).reverse().0) & mask.0)
}

/// Returns bishop attacks from the given square under the given occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    hyperbola(sq, occupancy, MASK_DIAGONAL[sq.diagonal() as usize])
        | hyperbola(sq, occupancy, MASK_ANTI_DIAGONAL[sq.anti_diagonal() as usize])
}

/// Returns rook attacks from the given square under the given occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    hyperbola(sq, occupancy, MASK_FILE[sq.file().index() as usize])
        | hyperbola(sq, occupancy, MASK_RANK[sq.rank().index() as usize])
}

/// Returns queen attacks from the given square under the given occupancy.
#[inline]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

const fn compute_file_masks() -> [Bitboard; 8] {
    let mut masks = [Bitboard::EMPTY; 8];
    let mut file = 0;
    while file < 8 {
        masks[file] = Bitboard(Bitboard::FILE_A.0 << file);
        file += 1;
    }
    masks
}

const fn compute_rank_masks() -> [Bitboard; 8] {
    let mut masks = [Bitboard::EMPTY; 8];
    let mut rank = 0;
    while rank < 8 {
        masks[rank] = Bitboard(Bitboard::RANK_1.0 << (8 * rank));
        rank += 1;
    }
    masks
}

const fn compute_diagonal_masks() -> [Bitboard; 15] {
    let mut masks = [Bitboard::EMPTY; 15];
    let mut sq = 0;
    while sq < 64 {
        let diagonal = 7 + sq / 8 - sq % 8;
        masks[diagonal] = Bitboard(masks[diagonal].0 | (1u64 << sq));
        sq += 1;
    }
    masks
}

const fn compute_anti_diagonal_masks() -> [Bitboard; 15] {
    let mut masks = [Bitboard::EMPTY; 15];
    let mut sq = 0;
    while sq < 64 {
        let anti_diagonal = sq / 8 + sq % 8;
        masks[anti_diagonal] = Bitboard(masks[anti_diagonal].0 | (1u64 << sq));
        sq += 1;
    }
    masks
}
