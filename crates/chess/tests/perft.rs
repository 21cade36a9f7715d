//! Perft (performance test) for validating move generation.
//!
//! Perft counts the leaf nodes of the full move tree at a given depth. The
//! counts below are the published reference values for each position.

use arena_chess::Position;

fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&pos.make_move(mv), depth - 1))
        .sum()
}

/// Perft with divide - node count per root move, for chasing mismatches
#[allow(dead_code)]
fn perft_divide(pos: &Position, depth: u32) -> u64 {
    let mut total = 0;
    for mv in pos.legal_moves() {
        let count = perft(&pos.make_move(mv), depth - 1);
        println!("{}: {}", mv, count);
        total += count;
    }
    println!("\nTotal: {}", total);
    total
}

// =============================================================================
// Starting position
// =============================================================================

#[test]
fn test_perft_starting_depth_1() {
    assert_eq!(perft(&Position::starting(), 1), 20);
}

#[test]
fn test_perft_starting_depth_2() {
    assert_eq!(perft(&Position::starting(), 2), 400);
}

#[test]
fn test_perft_starting_depth_3() {
    assert_eq!(perft(&Position::starting(), 3), 8_902);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_starting_depth_4() {
    assert_eq!(perft(&Position::starting(), 4), 197_281);
}

// =============================================================================
// Kiwipete: castling, pins and promotions all in one position
// =============================================================================

fn kiwipete() -> Position {
    Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap()
}

#[test]
fn test_perft_kiwipete_depth_1() {
    assert_eq!(perft(&kiwipete(), 1), 48);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    assert_eq!(perft(&kiwipete(), 2), 2_039);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_kiwipete_depth_3() {
    assert_eq!(perft(&kiwipete(), 3), 97_862);
}

// =============================================================================
// Position 3: en passant and rook endgame
// =============================================================================

fn position3() -> Position {
    Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap()
}

#[test]
fn test_perft_position3_depth_1() {
    assert_eq!(perft(&position3(), 1), 14);
}

#[test]
fn test_perft_position3_depth_2() {
    assert_eq!(perft(&position3(), 2), 191);
}

#[test]
fn test_perft_position3_depth_3() {
    assert_eq!(perft(&position3(), 3), 2_812);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_position3_depth_4() {
    assert_eq!(perft(&position3(), 4), 43_238);
}

// =============================================================================
// Position 4: promotions with capture, castling rights for black only
// =============================================================================

fn position4() -> Position {
    Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1").unwrap()
}

#[test]
fn test_perft_position4_depth_1() {
    assert_eq!(perft(&position4(), 1), 6);
}

#[test]
fn test_perft_position4_depth_2() {
    assert_eq!(perft(&position4(), 2), 264);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_position4_depth_3() {
    assert_eq!(perft(&position4(), 3), 9_467);
}

// =============================================================================
// Position 5
// =============================================================================

fn position5() -> Position {
    Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap()
}

#[test]
fn test_perft_position5_depth_1() {
    assert_eq!(perft(&position5(), 1), 44);
}

#[test]
fn test_perft_position5_depth_2() {
    assert_eq!(perft(&position5(), 2), 1_486);
}
