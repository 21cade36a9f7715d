//! Chess position on a 64-square mailbox.

use arena_core::{CoreError, Result};

use crate::attacks;
use crate::{Color, Move, MoveKind, Piece, PieceType, Square};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling rights encoded as a 4-bit value
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct CastlingRights(pub(crate) u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const ALL: Self = Self(15);

    const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    #[inline]
    pub fn grant_kingside(&mut self, color: Color) {
        self.0 |= Self::kingside_flag(color);
    }

    #[inline]
    pub fn grant_queenside(&mut self, color: Color) {
        self.0 |= Self::queenside_flag(color);
    }

    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_flag(color);
    }

    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_flag(color);
    }

    #[inline]
    pub fn remove_all(&mut self, color: Color) {
        self.0 &= !(Self::kingside_flag(color) | Self::queenside_flag(color));
    }

    /// Drop whichever right depends on a rook standing on `sq`
    fn touch_rook_home(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.remove_queenside(Color::White),
            Square::H1 => self.remove_kingside(Color::White),
            Square::A8 => self.remove_queenside(Color::Black),
            Square::H8 => self.remove_kingside(Color::Black),
            _ => {}
        }
    }

    /// Parse castling rights from FEN string (e.g., "KQkq", "Kq", "-")
    pub fn from_fen(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(Self::NONE);
        }
        let mut rights = Self::NONE;
        for c in s.chars() {
            match c {
                'K' => rights.0 |= Self::WHITE_KINGSIDE,
                'Q' => rights.0 |= Self::WHITE_QUEENSIDE,
                'k' => rights.0 |= Self::BLACK_KINGSIDE,
                'q' => rights.0 |= Self::BLACK_QUEENSIDE,
                _ => return None,
            }
        }
        Some(rights)
    }

    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|(_, c)| c)
        .collect()
    }
}

/// A complete chess position
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Pieces indexed by square (a1 = 0)
    board: [Option<Piece>; 64],
    /// King squares indexed by color
    kings: [Square; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    /// Square a pawn skipped over on the previous move
    en_passant_square: Option<Square>,
    /// Half-moves since the last pawn move or capture
    halfmove_clock: u16,
    /// Starts at 1, incremented after Black's move
    fullmove_number: u16,
}

impl Position {
    /// Create an empty position (no kings, so not yet valid)
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            kings: [Square::E1, Square::E8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create the starting position
    pub fn starting() -> Self {
        let mut pos = Position::empty();
        let back = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, piece_type) in back.into_iter().enumerate() {
            let file = file as u8;
            for color in [Color::White, Color::Black] {
                let home = Square::from_coords(file, color.back_rank());
                let pawn = Square::from_coords(file, color.pawn_start_rank());
                if let (Some(home), Some(pawn)) = (home, pawn) {
                    pos.set_piece(home, Piece::new(color, piece_type));
                    pos.set_piece(pawn, Piece::new(color, PieceType::Pawn));
                }
            }
        }
        pos.castling_rights = CastlingRights::ALL;
        pos
    }

    /// Parse a position from FEN notation.
    ///
    /// The clocks are optional. The result is validated: one king per side,
    /// no pawns on the back ranks, the side not to move not in check, and an
    /// en passant target that an enemy pawn just skipped over.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |msg: String| CoreError::InvalidPosition(msg);
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(invalid("FEN must have at least 4 parts".to_string()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
        }
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(invalid(format!("too many files in rank {}", rank + 1)));
                    }
                    continue;
                }
                let piece = Piece::from_char(c).ok_or_else(|| invalid(format!("invalid piece: {c}")))?;
                let sq = Square::from_coords(file, rank)
                    .ok_or_else(|| invalid(format!("too many files in rank {}", rank + 1)))?;
                pos.set_piece(sq, piece);
                file += 1;
            }
            if file != 8 {
                return Err(invalid(format!("rank {} has {} files", rank + 1, file)));
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(invalid(format!("invalid side to move: {other}"))),
        };

        pos.castling_rights = CastlingRights::from_fen(parts[2])
            .ok_or_else(|| invalid(format!("invalid castling rights: {}", parts[2])))?;

        pos.en_passant_square = match parts[3] {
            "-" => None,
            s => Some(
                Square::from_algebraic(s)
                    .ok_or_else(|| invalid(format!("invalid en passant square: {s}")))?,
            ),
        };

        if let Some(clock) = parts.get(4) {
            pos.halfmove_clock = clock
                .parse()
                .map_err(|_| invalid(format!("invalid halfmove clock: {clock}")))?;
        }
        if let Some(number) = parts.get(5) {
            pos.fullmove_number = number
                .parse()
                .map_err(|_| invalid(format!("invalid fullmove number: {number}")))?;
        }

        pos.validate()?;
        Ok(pos)
    }

    /// Convert position to FEN notation
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty_count = 0u8;
            for file in 0..8u8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push((b'0' + empty_count) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        fen.push_str(&self.castling_rights.to_fen());
        fen.push(' ');
        match self.en_passant_square {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));

        fen
    }

    /// Check the structural invariants of a decoded position.
    pub(crate) fn validate(&self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            let king = Piece::new(color, PieceType::King);
            let count = self.board.iter().filter(|&&p| p == Some(king)).count();
            if count != 1 {
                return Err(CoreError::InvalidPosition(format!(
                    "{color} has {count} kings, expected 1"
                )));
            }
        }

        let pawn_on_back_rank = Square::all().any(|sq| {
            (sq.rank() == 0 || sq.rank() == 7)
                && self.piece_at(sq).is_some_and(|p| p.piece_type == PieceType::Pawn)
        });
        if pawn_on_back_rank {
            return Err(CoreError::InvalidPosition(
                "pawn on first or last rank".to_string(),
            ));
        }

        if self.is_in_check(self.side_to_move.opposite()) {
            return Err(CoreError::InvalidPosition(format!(
                "{} is in check but {} is to move",
                self.side_to_move.opposite(),
                self.side_to_move
            )));
        }

        if let Some(ep) = self.en_passant_square {
            self.validate_en_passant(ep)?;
        }

        Ok(())
    }

    /// An en passant target must sit behind a pawn that just made a double push.
    fn validate_en_passant(&self, ep: Square) -> Result<()> {
        let them = self.side_to_move.opposite();
        let invalid = || CoreError::InvalidPosition(format!("invalid en passant square: {ep}"));

        // Target rank is the one the enemy pawn skipped over
        if ep.rank() != them.pawn_start_rank().wrapping_add_signed(them.pawn_direction()) {
            return Err(invalid());
        }
        let pushed = ep.offset(0, them.pawn_direction()).ok_or_else(invalid)?;
        let origin = ep.offset(0, -them.pawn_direction()).ok_or_else(invalid)?;
        if self.piece_at(ep).is_some()
            || self.piece_at(origin).is_some()
            || self.piece_at(pushed) != Some(Piece::new(them, PieceType::Pawn))
        {
            return Err(invalid());
        }
        Ok(())
    }

    /// Set a piece on a square, replacing whatever stood there
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
        if piece.piece_type == PieceType::King {
            self.kings[piece.color.index()] = sq;
        }
    }

    fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    /// Get the piece at a square, if any
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Iterate over occupied squares in index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Number of pieces of a given color and type
    pub fn count(&self, color: Color, piece_type: PieceType) -> usize {
        let wanted = Piece::new(color, piece_type);
        self.board.iter().filter(|&&p| p == Some(wanted)).count()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Half-moves played since the game began, derived from the move counters
    pub fn plies_played(&self) -> u32 {
        let base = u32::from(self.fullmove_number).saturating_sub(1) * 2;
        match self.side_to_move {
            Color::White => base,
            Color::Black => base + 1,
        }
    }

    /// Get the king square for a color
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Check if a square is attacked by a given color
    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        attacks::is_square_attacked(self, sq, by_color)
    }

    /// Check if the king of `color` is attacked
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }

    /// Check if the current side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Apply a move and return the new position.
    ///
    /// The move must come from [`Position::legal_moves`] (or the
    /// pseudo-legal generator) for this position.
    ///
    /// # Panics
    ///
    /// Panics if there is no piece on the origin square.
    pub fn make_move(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        let piece = next
            .remove_piece(from)
            .expect("make_move called without a piece on the origin square");
        debug_assert_eq!(piece.color, us);

        let captured = match mv.kind() {
            MoveKind::EnPassant => Square::from_coords(to.file(), from.rank())
                .and_then(|sq| next.remove_piece(sq)),
            _ => next.remove_piece(to),
        };
        debug_assert!(captured.map_or(true, |p| p.color != us));

        let placed = match mv.promotion_piece() {
            Some(promo) => Piece::new(us, promo),
            None => piece,
        };
        next.set_piece(to, placed);

        let rook_hop = match (mv.kind(), us) {
            (MoveKind::KingCastle, Color::White) => Some((Square::H1, Square::F1)),
            (MoveKind::KingCastle, Color::Black) => Some((Square::H8, Square::F8)),
            (MoveKind::QueenCastle, Color::White) => Some((Square::A1, Square::D1)),
            (MoveKind::QueenCastle, Color::Black) => Some((Square::A8, Square::D8)),
            _ => None,
        };
        if let Some((rook_from, rook_to)) = rook_hop {
            if let Some(rook) = next.remove_piece(rook_from) {
                next.set_piece(rook_to, rook);
            }
        }

        if piece.piece_type == PieceType::King {
            next.castling_rights.remove_all(us);
        }
        next.castling_rights.touch_rook_home(from);
        next.castling_rights.touch_rook_home(to);

        next.en_passant_square = if mv.is_double_pawn_push() {
            Square::from_coords(to.file(), (from.rank() + to.rank()) / 2)
        } else {
            None
        };

        next.halfmove_clock = if piece.piece_type == PieceType::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if us == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        next.side_to_move = us.opposite();
        next
    }

    /// True if neither side can possibly deliver mate: K v K, K+minor v K,
    /// or K+B v K+B with bishops on the same square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: [Vec<(PieceType, Square)>; 2] = [Vec::new(), Vec::new()];
        for (sq, piece) in self.pieces() {
            match piece.piece_type {
                PieceType::King => {}
                PieceType::Knight | PieceType::Bishop => {
                    minors[piece.color.index()].push((piece.piece_type, sq))
                }
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
            }
        }

        match (minors[0].as_slice(), minors[1].as_slice()) {
            ([], []) | ([_], []) | ([], [_]) => true,
            ([(PieceType::Bishop, a)], [(PieceType::Bishop, b)]) => {
                (a.file() + a.rank()) % 2 == (b.file() + b.rank()) % 2
            }
            _ => false,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Position {{")?;
        writeln!(f, "  FEN: {}", self.to_fen())?;
        for rank in (0..8u8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8u8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let pos = Position::starting();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.count(Color::White, PieceType::Pawn), 8);
        assert_eq!(pos.count(Color::Black, PieceType::Pawn), 8);
        assert_eq!(pos.count(Color::White, PieceType::King), 1);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.to_fen(), STARTING_FEN);
        assert_eq!(Position::from_fen(STARTING_FEN).unwrap(), pos);
    }

    #[test]
    fn test_fen_roundtrip() {
        let fens = [
            STARTING_FEN,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        ];
        for fen in fens {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_rejects_invalid_positions() {
        // missing black king
        assert!(Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // two white kings
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_err());
        // pawn on the eighth rank
        assert!(Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // black to move while white is in check
        assert!(Position::from_fen("4k3/8/8/8/8/8/4r3/4K3 b - - 0 1").is_err());
        // short rank
        assert!(Position::from_fen("4k3/8/8/8/8/8/7/4K3 w - - 0 1").is_err());
        assert!(matches!(
            Position::from_fen("nonsense"),
            Err(CoreError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_fen_rejects_rank_overflow() {
        let long_rank = "8".repeat(40);
        let fen = format!("4k3/8/8/{long_rank}/8/8/8/4K3 w - - 0 1");
        assert!(matches!(Position::from_fen(&fen), Err(CoreError::InvalidPosition(_))));
        let fen = format!("4k3/8/8/{}/8/8/8/4K3 w - - 0 1", "8".repeat(33));
        assert!(Position::from_fen(&fen).is_err());
        assert!(Position::from_fen("4k3/8/8/44p/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn test_fen_rejects_incoherent_en_passant() {
        let rejected = [
            // e6 occupied by a white pawn
            "4k3/8/4P3/3PP3/8/8/8/4K3 w - e6 0 1",
            // no black pawn on e5
            "4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1",
            // white pawn on e5 instead of a black one
            "4k3/8/8/4P3/8/8/8/4K3 w - e6 0 1",
            // wrong rank for the side to move
            "4k3/8/8/4p3/8/8/8/4K3 w - e3 0 1",
            "4k3/8/8/8/4P3/8/8/4K3 b - e6 0 1",
            // origin square still occupied
            "4k3/4p3/8/4p3/8/8/8/4K3 w - e6 0 1",
        ];
        for fen in rejected {
            assert!(
                matches!(Position::from_fen(fen), Err(CoreError::InvalidPosition(_))),
                "{fen}"
            );
        }

        let pos = Position::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 2").unwrap();
        assert_eq!(pos.en_passant_square(), Some(Square::E6));
        let pos = Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(pos.en_passant_square(), Some(Square::E3));
    }

    #[test]
    fn test_is_check() {
        let pos = Position::from_fen("7k/8/8/8/8/8/1q6/K7 w - - 0 1").unwrap();
        assert!(pos.is_check());
        assert!(pos.is_in_check(Color::White));
        assert!(!pos.is_in_check(Color::Black));
        assert!(!Position::starting().is_check());
    }

    #[test]
    fn test_make_move_does_not_mutate_input() {
        let pos = Position::starting();
        let before = pos.clone();
        let next = pos.make_move(Move::double_pawn_push(Square::E2, Square::E4));

        assert_eq!(pos, before);
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
        assert!(next.piece_at(Square::E2).is_none());
        assert_eq!(next.en_passant_square(), Some(Square::E3));
        assert_eq!(next.plies_played(), 1);
    }

    #[test]
    fn test_make_move_capture_resets_clock() {
        let pos = Position::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 3 2",
        )
        .unwrap();
        let next = pos.make_move(Move::capture(Square::E4, Square::D5));
        assert_eq!(next.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(next.count(Color::Black, PieceType::Pawn), 7);
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn test_make_move_castle_kingside() {
        let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let next = pos.make_move(Move::king_castle(Square::E1, Square::G1));

        assert_eq!(next.piece_at(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(next.piece_at(Square::F1), Some(Piece::WHITE_ROOK));
        assert!(next.piece_at(Square::E1).is_none());
        assert!(next.piece_at(Square::H1).is_none());
        assert_eq!(next.king_square(Color::White), Square::G1);
        assert!(!next.castling_rights().can_castle_kingside(Color::White));
        assert!(!next.castling_rights().can_castle_queenside(Color::White));
        assert!(next.castling_rights().can_castle_queenside(Color::Black));
    }

    #[test]
    fn test_rook_capture_removes_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = pos.make_move(Move::capture(Square::A1, Square::A8));
        assert!(!next.castling_rights().can_castle_queenside(Color::White));
        assert!(!next.castling_rights().can_castle_queenside(Color::Black));
        assert!(next.castling_rights().can_castle_kingside(Color::Black));
    }

    #[test]
    fn test_make_move_en_passant() {
        let pos = Position::from_fen(
            "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3",
        )
        .unwrap();
        let next = pos.make_move(Move::en_passant(Square::F5, Square::E6));

        assert_eq!(next.piece_at(Square::E6), Some(Piece::WHITE_PAWN));
        assert!(next.piece_at(Square::E5).is_none());
        assert!(next.piece_at(Square::F5).is_none());
        assert_eq!(next.count(Color::Black, PieceType::Pawn), 7);
    }

    #[test]
    fn test_make_move_promotion() {
        let pos = Position::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let next = pos.make_move(Move::promotion(Square::A7, Square::A8, PieceType::Queen, false));
        assert_eq!(next.piece_at(Square::A8), Some(Piece::WHITE_QUEEN));
        assert!(next.piece_at(Square::A7).is_none());
    }

    #[test]
    #[should_panic(expected = "origin square")]
    fn test_make_move_without_piece_panics() {
        Position::starting().make_move(Move::quiet(Square::E4, Square::E5));
    }

    #[test]
    fn test_insufficient_material() {
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KN2 w - - 0 1", true),
            ("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
            ("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.is_insufficient_material(), expected, "{fen}");
        }
    }
}
