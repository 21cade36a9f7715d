//! Piece geometry and attack detection on the mailbox board.
//!
//! Offsets are `(file_delta, rank_delta)` pairs. Their order is the order in
//! which the move generator emits destinations, so it is part of the
//! deterministic move ordering and must not be shuffled.

use crate::{Color, PieceType, Position, Square};

/// Knight jumps, upper ones first
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, 2),
    (1, 2),
    (-2, 1),
    (2, 1),
    (-2, -1),
    (2, -1),
    (-1, -2),
    (1, -2),
];

/// King steps, upper row first
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Orthogonal ray directions: north, south, west, east
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Diagonal ray directions: north-west, north-east, south-west, south-east
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// Queen directions: orthogonals, then diagonals
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// Squares reached by single steps from `sq`, in offset order.
pub fn step_targets(sq: Square, offsets: &'static [(i8, i8)]) -> impl Iterator<Item = Square> {
    offsets.iter().filter_map(move |&(df, dr)| sq.offset(df, dr))
}

/// Squares along a ray from `sq` (exclusive) up to the board edge.
///
/// Blockers are the caller's business: stop at the first occupied square.
pub fn ray(sq: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(sq.offset(df, dr), move |s| s.offset(df, dr))
}

/// Squares from which a pawn of `color` would attack `sq`.
fn pawn_attacker_squares(sq: Square, color: Color) -> impl Iterator<Item = Square> {
    let back = -color.pawn_direction();
    [(-1, back), (1, back)]
        .into_iter()
        .filter_map(move |(df, dr)| sq.offset(df, dr))
}

/// Check if `sq` is attacked by any piece of `by_color`.
///
/// Looks outward from the target square: a knight a knight-jump away, a
/// king a step away, a pawn on the right diagonal, or the first piece along
/// each ray being a matching slider.
pub fn is_square_attacked(pos: &Position, sq: Square, by_color: Color) -> bool {
    let is = |s: Square, kinds: &[PieceType]| {
        pos.piece_at(s)
            .is_some_and(|p| p.color == by_color && kinds.contains(&p.piece_type))
    };

    if pawn_attacker_squares(sq, by_color).any(|s| is(s, &[PieceType::Pawn])) {
        return true;
    }
    if step_targets(sq, &KNIGHT_OFFSETS).any(|s| is(s, &[PieceType::Knight])) {
        return true;
    }
    if step_targets(sq, &KING_OFFSETS).any(|s| is(s, &[PieceType::King])) {
        return true;
    }

    let first_blocker = |dir| ray(sq, dir).find(|&s| pos.piece_at(s).is_some());
    for dir in ROOK_DIRECTIONS {
        if first_blocker(dir).is_some_and(|s| is(s, &[PieceType::Rook, PieceType::Queen])) {
            return true;
        }
    }
    for dir in BISHOP_DIRECTIONS {
        if first_blocker(dir).is_some_and(|s| is(s, &[PieceType::Bishop, PieceType::Queen])) {
            return true;
        }
    }

    false
}
