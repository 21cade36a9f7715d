//! Static evaluation used at the search horizon.
//!
//! Material in centipawns (P=100, N=300, B=300, R=500, Q=900, king not
//! counted), optionally refined with piece-square bonuses.

use crate::{Color, PieceType, Position, Square};

/// Piece-square bonuses from White's point of view, laid out like the grid:
/// index 0 is a8, index 63 is h1. Black reads them mirrored vertically.
#[rustfmt::skip]
const PIECE_SQUARE: [[i8; 64]; 6] = [
    // Pawn
    [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ],
    // Knight
    [
        -50,-40,-30,-30,-30,-30,-40,-50,
        -40,-20,  0,  0,  0,  0,-20,-40,
        -30,  0, 10, 15, 15, 10,  0,-30,
        -30,  5, 15, 20, 20, 15,  5,-30,
        -30,  0, 15, 20, 20, 15,  0,-30,
        -30,  5, 10, 15, 15, 10,  5,-30,
        -40,-20,  0,  5,  5,  0,-20,-40,
        -50,-40,-30,-30,-30,-30,-40,-50,
    ],
    // Bishop
    [
        -20,-10,-10,-10,-10,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5, 10, 10,  5,  0,-10,
        -10,  5,  5, 10, 10,  5,  5,-10,
        -10,  0, 10, 10, 10, 10,  0,-10,
        -10, 10, 10, 10, 10, 10, 10,-10,
        -10,  5,  0,  0,  0,  0,  5,-10,
        -20,-10,-10,-10,-10,-10,-10,-20,
    ],
    // Rook
    [
         0,  0,  0,  0,  0,  0,  0,  0,
         5, 10, 10, 10, 10, 10, 10,  5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
         0,  0,  0,  5,  5,  0,  0,  0,
    ],
    // Queen
    [
        -20,-10,-10, -5, -5,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5,  5,  5,  5,  0,-10,
         -5,  0,  5,  5,  5,  5,  0, -5,
          0,  0,  5,  5,  5,  5,  0, -5,
        -10,  5,  5,  5,  5,  5,  0,-10,
        -10,  0,  5,  0,  0,  0,  0,-10,
        -20,-10,-10, -5, -5,-10,-10,-20,
    ],
    // King
    [
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -20,-30,-30,-40,-40,-30,-30,-20,
        -10,-20,-20,-20,-20,-20,-20,-10,
         20, 20,  0,  0,  0,  0, 20, 20,
         20, 30, 10,  0,  0, 10, 30, 20,
    ],
];

/// Bonus for a piece of `color` and `piece_type` standing on `sq`
pub fn piece_square_bonus(piece_type: PieceType, color: Color, sq: Square) -> i32 {
    let row = match color {
        Color::White => sq.grid_row(),
        Color::Black => sq.rank(),
    };
    let index = (row * 8 + sq.file()) as usize;
    i32::from(PIECE_SQUARE[piece_type.index()][index])
}

/// Material balance in centipawns from `perspective`'s point of view
pub fn material_balance(pos: &Position, perspective: Color) -> i32 {
    pos.pieces()
        .map(|(_, piece)| {
            let value = piece.piece_type.value();
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Static score of `pos` from `perspective`'s point of view.
pub fn evaluate(pos: &Position, perspective: Color, piece_square: bool) -> i32 {
    let material = material_balance(pos, perspective);
    if !piece_square {
        return material;
    }
    let positional: i32 = pos
        .pieces()
        .map(|(sq, piece)| {
            let bonus = piece_square_bonus(piece.piece_type, piece.color, sq);
            if piece.color == perspective {
                bonus
            } else {
                -bonus
            }
        })
        .sum();
    material + positional
}
