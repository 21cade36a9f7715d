//! Cell-grid codec for positions.
//!
//! The grid is 8 rows of 8 cells. Row 0 is rank 8, column 0 is the a-file.
//! A cell holds a FEN piece letter or the empty string. Grids carry no
//! castling, en passant or clock information, so decoding infers castling
//! rights from kings and rooks still on their home squares.

use arena_core::{CoreError, Result};

use crate::{CastlingRights, Color, Piece, PieceType, Position, Square};

impl Position {
    /// Encode the piece placement as a row-major grid of cell strings
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        (0..8u8)
            .map(|row| {
                (0..8u8)
                    .map(|col| {
                        Square::from_grid(row, col)
                            .and_then(|sq| self.piece_at(sq))
                            .map(|p| p.to_char().to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    /// Decode a grid with `side_to_move` to play.
    ///
    /// The clocks start fresh and there is no en passant target. The
    /// decoded position goes through the same validation as FEN.
    pub fn from_grid<S: AsRef<str>>(grid: &[Vec<S>], side_to_move: Color) -> Result<Self> {
        if grid.len() != 8 || grid.iter().any(|row| row.len() != 8) {
            return Err(CoreError::InvalidPosition(
                "chess grid must be 8x8".to_string(),
            ));
        }

        let mut pos = Position::empty();
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let cell = cell.as_ref();
                if cell.is_empty() {
                    continue;
                }
                let mut chars = cell.chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(c), None) => Piece::from_char(c),
                    _ => None,
                }
                .ok_or_else(|| CoreError::InvalidPosition(format!("invalid cell: {cell:?}")))?;
                if let Some(sq) = Square::from_grid(row as u8, col as u8) {
                    pos.set_piece(sq, piece);
                }
            }
        }

        pos.set_side_to_move(side_to_move);
        pos.set_castling_rights(inferred_castling_rights(&pos));
        pos.validate()?;
        Ok(pos)
    }
}

fn inferred_castling_rights(pos: &Position) -> CastlingRights {
    let mut rights = CastlingRights::NONE;
    for color in [Color::White, Color::Black] {
        let home = |file: u8| Square::new_unchecked(color.back_rank() * 8 + file);
        if pos.piece_at(home(4)) != Some(Piece::new(color, PieceType::King)) {
            continue;
        }
        let rook = Some(Piece::new(color, PieceType::Rook));
        if pos.piece_at(home(7)) == rook {
            rights.grant_kingside(color);
        }
        if pos.piece_at(home(0)) == rook {
            rights.grant_queenside(color);
        }
    }
    rights
}
