//! Chess moves.
//!
//! A move is an origin, a destination and a [`MoveKind`] that tells
//! `make_move` which side effects to apply (rook hop, pawn removal,
//! promotion). Only the generator builds moves with a kind; callers from
//! the outside describe a move by squares and look it up with
//! [`Move::matches`].

use std::fmt;

use crate::{PieceType, Square};

/// What a move does besides relocating the moving piece
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    Quiet,
    DoublePawnPush,
    Capture,
    EnPassant,
    KingCastle,
    QueenCastle,
    Promotion { piece: PieceType, capture: bool },
}

/// A chess move
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Create a new move
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Create a quiet move (no capture, no special flags)
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Quiet)
    }

    /// Create a capture move
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Capture)
    }

    /// Create a double pawn push
    #[inline]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::DoublePawnPush)
    }

    /// Create an en passant capture
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::EnPassant)
    }

    /// Create a kingside castle
    #[inline]
    pub const fn king_castle(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::KingCastle)
    }

    /// Create a queenside castle
    #[inline]
    pub const fn queen_castle(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::QueenCastle)
    }

    /// Create a promotion move
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: PieceType, capture: bool) -> Self {
        Self::new(from, to, MoveKind::Promotion { piece, capture })
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Check if this move removes an enemy piece
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::Promotion { capture: true, .. }
        )
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::KingCastle | MoveKind::QueenCastle)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }

    /// Get the promotion piece type, if this is a promotion
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// True if this move goes `from` → `to` and, for promotions, promotes to
    /// `promotion` (queen when `None`).
    pub fn matches(self, from: Square, to: Square, promotion: Option<PieceType>) -> bool {
        if self.from != from || self.to != to {
            return false;
        }
        match self.promotion_piece() {
            Some(piece) => piece == promotion.unwrap_or(PieceType::Queen),
            None => promotion.is_none(),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} -> {}", self.from, self.to)?;
        match self.kind {
            MoveKind::Promotion { piece, .. } => write!(f, "={}", piece.to_char())?,
            MoveKind::KingCastle => write!(f, " castle:K")?,
            MoveKind::QueenCastle => write!(f, " castle:Q")?,
            MoveKind::EnPassant => write!(f, " e.p.")?,
            _ => {}
        }
        write!(f, ")")
    }
}

/// Long algebraic (UCI) notation, e.g. `e2e4`, `e7e8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_accessors() {
        let mv = Move::double_pawn_push(Square::E2, Square::E4);
        assert_eq!(mv.from(), Square::E2);
        assert_eq!(mv.to(), Square::E4);
        assert!(mv.is_double_pawn_push());
        assert!(!mv.is_capture());
        assert!(!mv.is_promotion());
    }

    #[test]
    fn test_move_promotion() {
        let mv = Move::promotion(Square::E7, Square::E8, PieceType::Queen, false);
        assert!(mv.is_promotion());
        assert!(!mv.is_capture());
        assert_eq!(mv.promotion_piece(), Some(PieceType::Queen));

        let mv = Move::promotion(Square::E7, Square::D8, PieceType::Knight, true);
        assert!(mv.is_capture());
        assert_eq!(mv.promotion_piece(), Some(PieceType::Knight));
    }

    #[test]
    fn test_special_moves() {
        assert!(Move::king_castle(Square::E1, Square::G1).is_castle());
        assert!(Move::queen_castle(Square::E8, Square::C8).is_castle());
        let ep = Move::en_passant(Square::E5, Square::D6);
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
    }

    #[test]
    fn test_matches_defaults_to_queen() {
        let queen = Move::promotion(Square::A7, Square::A8, PieceType::Queen, false);
        let rook = Move::promotion(Square::A7, Square::A8, PieceType::Rook, false);
        assert!(queen.matches(Square::A7, Square::A8, None));
        assert!(!rook.matches(Square::A7, Square::A8, None));
        assert!(rook.matches(Square::A7, Square::A8, Some(PieceType::Rook)));

        let push = Move::quiet(Square::E2, Square::E3);
        assert!(push.matches(Square::E2, Square::E3, None));
        assert!(!push.matches(Square::E2, Square::E3, Some(PieceType::Queen)));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::quiet(Square::G1, Square::F3).to_string(), "g1f3");
        let mv = Move::promotion(Square::E7, Square::E8, PieceType::Queen, false);
        assert_eq!(mv.to_string(), "e7e8q");
    }
}
