//! Legal move generation for chess.
//!
//! Moves are generated pseudo-legally by scanning the board in grid order
//! (rank 8 down to rank 1, a-file to h-file), then filtered by playing each
//! move on a scratch position and rejecting those that leave the mover's
//! king attacked. The resulting order is deterministic.

use crate::attacks::{
    ray, step_targets, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
use crate::{Color, Move, Piece, PieceType, Position, Square};

impl Position {
    /// Generate all legal moves from this position
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|&mv| !self.leaves_king_in_check(mv));
        moves
    }

    /// Legal moves of the piece standing on `from`, in generation order
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves_from(from);
        moves.retain(|&mv| !self.leaves_king_in_check(mv));
        moves
    }

    /// Pseudo-legal moves of the piece on `from`; empty unless it belongs
    /// to the side to move
    pub fn pseudo_legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.piece_at(from).filter(|p| p.color == self.side_to_move()) {
            self.generate_piece_moves(from, piece, &mut moves);
        }
        moves
    }

    /// True if the side to move has at least one legal move
    pub fn has_legal_moves(&self) -> bool {
        self.pseudo_legal_moves()
            .into_iter()
            .any(|mv| !self.leaves_king_in_check(mv))
    }

    /// Find the legal move going `from` → `to`.
    ///
    /// For a promoting pawn, `promotion` picks the piece (queen when `None`).
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Option<Move> {
        self.legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.matches(from, to, promotion))
    }

    /// Generate pseudo-legal moves (may leave the own king in check)
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let us = self.side_to_move();
        let mut moves = Vec::with_capacity(64);
        for from in Square::grid_order() {
            if let Some(piece) = self.piece_at(from).filter(|p| p.color == us) {
                self.generate_piece_moves(from, piece, &mut moves);
            }
        }
        moves
    }

    fn leaves_king_in_check(&self, mv: Move) -> bool {
        self.make_move(mv).is_in_check(self.side_to_move())
    }

    fn generate_piece_moves(&self, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.piece_type {
            PieceType::Pawn => self.generate_pawn_moves(from, piece.color, moves),
            PieceType::Knight => self.generate_step_moves(from, piece.color, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => self.generate_slider_moves(from, piece.color, &BISHOP_DIRECTIONS, moves),
            PieceType::Rook => self.generate_slider_moves(from, piece.color, &ROOK_DIRECTIONS, moves),
            PieceType::Queen => self.generate_slider_moves(from, piece.color, &QUEEN_DIRECTIONS, moves),
            PieceType::King => {
                self.generate_step_moves(from, piece.color, &KING_OFFSETS, moves);
                self.generate_castling_moves(from, piece.color, moves);
            }
        }
    }

    fn generate_pawn_moves(&self, from: Square, us: Color, moves: &mut Vec<Move>) {
        let dir = us.pawn_direction();
        let promotes = |to: Square| to.rank() == us.promotion_rank();

        // Pushes
        if let Some(one) = from.offset(0, dir).filter(|&sq| self.piece_at(sq).is_none()) {
            if promotes(one) {
                for piece in PieceType::PROMOTIONS {
                    moves.push(Move::promotion(from, one, piece, false));
                }
            } else {
                moves.push(Move::quiet(from, one));
                if from.rank() == us.pawn_start_rank() {
                    if let Some(two) = one.offset(0, dir).filter(|&sq| self.piece_at(sq).is_none()) {
                        moves.push(Move::double_pawn_push(from, two));
                    }
                }
            }
        }

        // Captures, west then east
        for df in [-1, 1] {
            let Some(to) = from.offset(df, dir) else {
                continue;
            };
            if self.piece_at(to).is_some_and(|p| p.color != us) {
                if promotes(to) {
                    for piece in PieceType::PROMOTIONS {
                        moves.push(Move::promotion(from, to, piece, true));
                    }
                } else {
                    moves.push(Move::capture(from, to));
                }
            }
        }

        // En passant
        if let Some(ep) = self.en_passant_square() {
            if ep.rank() == from.rank().wrapping_add_signed(dir)
                && ep.file().abs_diff(from.file()) == 1
                && self.piece_at(ep).is_none()
            {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }

    fn generate_step_moves(
        &self,
        from: Square,
        us: Color,
        offsets: &'static [(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for to in step_targets(from, offsets) {
            match self.piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(p) if p.color != us => moves.push(Move::capture(from, to)),
                Some(_) => {}
            }
        }
    }

    fn generate_slider_moves(
        &self,
        from: Square,
        us: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &dir in directions {
            for to in ray(from, dir) {
                match self.piece_at(to) {
                    None => moves.push(Move::quiet(from, to)),
                    Some(p) => {
                        if p.color != us {
                            moves.push(Move::capture(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Castling: the right must still be held, the rook must stand on its
    /// home square, the squares between must be empty, and the king may not
    /// start in, pass through or land on an attacked square.
    fn generate_castling_moves(&self, from: Square, us: Color, moves: &mut Vec<Move>) {
        let rank = us.back_rank();
        let home = |file: u8| Square::new_unchecked(rank * 8 + file);
        if from != home(4) {
            return;
        }
        let rights = self.castling_rights();
        if !rights.can_castle_kingside(us) && !rights.can_castle_queenside(us) {
            return;
        }
        let them = us.opposite();
        if self.is_square_attacked(from, them) {
            return;
        }
        let rook = Piece::new(us, PieceType::Rook);
        let empty = |files: &[u8]| files.iter().all(|&f| self.piece_at(home(f)).is_none());
        let safe = |files: &[u8]| files.iter().all(|&f| !self.is_square_attacked(home(f), them));

        if rights.can_castle_kingside(us)
            && self.piece_at(home(7)) == Some(rook)
            && empty(&[5, 6])
            && safe(&[5, 6])
        {
            moves.push(Move::king_castle(from, home(6)));
        }
        if rights.can_castle_queenside(us)
            && self.piece_at(home(0)) == Some(rook)
            && empty(&[1, 2, 3])
            && safe(&[3, 2])
        {
            moves.push(Move::queen_castle(from, home(2)));
        }
    }
}
