//! Invariant checks over random legal-move walks from the reference
//! positions, plus end-state predicate scenarios.

use chess_core::{Color, ColoredPiece, Piece, Square};
use chess_movegen::{Bitboard, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REFERENCE_FENS: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2pP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
];

/// Everything a snapshot must restore, read through the public API.
type Snapshot = (
    Vec<Option<ColoredPiece>>,
    Color,
    Option<Square>,
    u8,
    u32,
    u32,
    u64,
);

fn snapshot(position: &Position) -> Snapshot {
    let board = (0..64)
        .map(|i| position.piece_at(Square::from_index(i).unwrap()))
        .collect();
    (
        board,
        position.side_to_move(),
        position.ep_square(),
        position.castling_rights().raw(),
        position.halfmove_clock(),
        position.fullmove_number(),
        position.hash_key(),
    )
}

fn assert_invariants(position: &Position) {
    // Bitboards are pairwise disjoint and agree with the mailbox
    let mut seen = Bitboard::EMPTY;
    for color in Color::ALL {
        for piece in Piece::ALL {
            let bb = position.pieces_of(piece, color);
            assert!(
                (bb & seen).is_empty(),
                "piece bitboards overlap for {} {}",
                color,
                piece
            );
            seen |= bb;
            for sq in bb {
                assert_eq!(
                    position.piece_at(sq),
                    Some(ColoredPiece::new(color, piece)),
                    "mailbox disagrees with bitboard on {}",
                    sq
                );
            }
        }
        assert_eq!(
            position.pieces_of(Piece::King, color).count(),
            1,
            "{} must have exactly one king",
            color
        );
    }

    for i in 0..64 {
        let sq = Square::from_index(i).unwrap();
        if !seen.contains(sq) {
            assert_eq!(position.piece_at(sq), None, "ghost piece on {}", sq);
        }
    }
    assert_eq!(seen, position.occupied());
}

fn random_walk(fen: &str, seed: u64) {
    let mut position = Position::from_fen(fen).unwrap();
    let initial = snapshot(&position);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut made = 0usize;

    for _ in 0..20 {
        let moves = position.legal_moves();
        if moves.is_empty() {
            break;
        }
        let choice = moves[rng.gen_range(0..moves.len())];
        let before = snapshot(&position);

        position.make(choice);
        assert_invariants(&position);

        // The mover's king is never left in check
        let mover = position.side_to_move().opposite();
        assert!(
            !position.is_attacked(position.king_square(mover), position.side_to_move()),
            "{} left its king in check after {}",
            mover,
            choice
        );

        // make followed by unmake restores the position bit for bit
        position.unmake();
        assert_eq!(snapshot(&position), before, "unmake diverged after {}", choice);

        position.make(choice);
        made += 1;
    }

    for _ in 0..made {
        position.unmake();
    }
    assert_eq!(position.ply(), 0);
    assert_eq!(snapshot(&position), initial, "full unwind diverged");
}

#[test]
fn random_walks_preserve_invariants() {
    for (i, fen) in REFERENCE_FENS.iter().enumerate() {
        for seed in 0..4u64 {
            random_walk(fen, seed.wrapping_mul(31).wrapping_add(i as u64));
        }
    }
}

#[test]
fn initial_positions_satisfy_invariants() {
    for fen in REFERENCE_FENS {
        let position = Position::from_fen(fen).unwrap();
        assert_invariants(&position);
    }
}

#[test]
fn checkmate_scenario() {
    let position = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(position.is_check());
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
    assert!(position.legal_moves().is_empty());
}

#[test]
fn stalemate_scenario() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!position.is_check());
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
    assert!(position.legal_moves().is_empty());
}

#[test]
fn quiet_kings_and_pawns_scenario() {
    let position = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();
    assert!(!position.is_checkmate());
    assert!(!position.is_stalemate());
    assert_eq!(position.legal_moves().len(), 8);
}
