//! Zobrist hashing for position identification.
//!
//! A position hash is the XOR of random constants for:
//! - each piece on each square (12 x 64 = 768 values),
//! - the en passant file (8 values), folded in only when the square is
//!   actually capturable,
//! - the castling rights mask (4 base values expanded into a 16-entry
//!   combination table),
//! - the side to move (1 value, XORed when White is to move).

use chess_core::{ColoredPiece, File, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for pieces: [colored piece][square].
    pieces: [[u64; 64]; 12],
    /// Keys for the en passant file.
    en_passant: [u64; 8],
    /// Keys for each castling rights mask, one per 4-bit combination.
    castling: [u64; 16],
    /// Key XORed in when White is to move.
    white_to_move: u64,
}

impl ZobristKeys {
    /// Initializes Zobrist keys using a simple PRNG.
    ///
    /// Uses a fixed seed for reproducibility across runs.
    pub const fn new() -> Self {
        // Simple xorshift64 PRNG for const initialization
        const fn next_random(state: u64) -> (u64, u64) {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x, x)
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64; // Golden ratio seed
        let mut pieces = [[0u64; 64]; 12];
        let mut en_passant = [0u64; 8];
        let mut castling_bits = [0u64; 4];

        let mut piece = 0;
        while piece < 12 {
            let mut square = 0;
            while square < 64 {
                let (new_state, value) = next_random(state);
                state = new_state;
                pieces[piece][square] = value;
                square += 1;
            }
            piece += 1;
        }

        let mut file = 0;
        while file < 8 {
            let (new_state, value) = next_random(state);
            state = new_state;
            en_passant[file] = value;
            file += 1;
        }

        let mut bit = 0;
        while bit < 4 {
            let (new_state, value) = next_random(state);
            state = new_state;
            castling_bits[bit] = value;
            bit += 1;
        }

        let (_, white_to_move) = next_random(state);

        // Expand the four per-right keys into one key per rights mask
        let mut castling = [0u64; 16];
        let mut mask = 0;
        while mask < 16 {
            let mut key = 0u64;
            let mut bit = 0;
            while bit < 4 {
                if mask & (1 << bit) != 0 {
                    key ^= castling_bits[bit];
                }
                bit += 1;
            }
            castling[mask] = key;
            mask += 1;
        }

        ZobristKeys {
            pieces,
            en_passant,
            castling,
            white_to_move,
        }
    }

    /// Returns the key for a piece on a square.
    #[inline]
    pub const fn piece_key(&self, piece: ColoredPiece, square: Square) -> u64 {
        self.pieces[piece.index()][square.index() as usize]
    }

    /// Returns the key for an en passant file.
    #[inline]
    pub const fn en_passant_key(&self, file: File) -> u64 {
        self.en_passant[file.index() as usize]
    }

    /// Returns the key for a 4-bit castling rights mask.
    #[inline]
    pub const fn castling_key(&self, rights: u8) -> u64 {
        self.castling[(rights & 0xF) as usize]
    }

    /// Returns the side-to-move key.
    #[inline]
    pub const fn side_key(&self) -> u64 {
        self.white_to_move
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
