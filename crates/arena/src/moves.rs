//! Move wire types.
//!
//! A submitted move is either a tic-tac-toe cell or a chess origin and
//! destination on the display grid. Both are plain row/column pairs so a
//! client never needs to know about squares or FEN.

use std::fmt;

use arena_chess::PieceType;
use arena_core::Side;
use serde::{Deserialize, Serialize};

/// A cell of the display grid. Row 0 is the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: u8,
    pub col: u8,
}

impl GridCoord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Promotion piece letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionChoice {
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "n")]
    Knight,
}

impl From<PromotionChoice> for PieceType {
    fn from(choice: PromotionChoice) -> PieceType {
        match choice {
            PromotionChoice::Queen => PieceType::Queen,
            PromotionChoice::Rook => PieceType::Rook,
            PromotionChoice::Bishop => PieceType::Bishop,
            PromotionChoice::Knight => PieceType::Knight,
        }
    }
}

impl TryFrom<PieceType> for PromotionChoice {
    type Error = PieceType;

    fn try_from(piece: PieceType) -> Result<Self, PieceType> {
        match piece {
            PieceType::Queen => Ok(PromotionChoice::Queen),
            PieceType::Rook => Ok(PromotionChoice::Rook),
            PieceType::Bishop => Ok(PromotionChoice::Bishop),
            PieceType::Knight => Ok(PromotionChoice::Knight),
            other => Err(other),
        }
    }
}

/// A tic-tac-toe move.
///
/// Coordinates are signed so that out-of-range input decodes and is then
/// rejected as off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellMove {
    pub row: i32,
    pub col: i32,
}

/// A chess move from one grid cell to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionChoice>,
}

impl ChessMove {
    pub fn new(from: GridCoord, to: GridCoord) -> Self {
        Self {
            from_row: from.row.into(),
            from_col: from.col.into(),
            to_row: to.row.into(),
            to_col: to.col.into(),
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, choice: PromotionChoice) -> Self {
        self.promotion = Some(choice);
        self
    }
}

/// A move as submitted by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerMove {
    Chess(ChessMove),
    Cell(CellMove),
}

impl PlayerMove {
    pub fn cell(row: i32, col: i32) -> Self {
        PlayerMove::Cell(CellMove { row, col })
    }

    pub fn chess(from: GridCoord, to: GridCoord) -> Self {
        PlayerMove::Chess(ChessMove::new(from, to))
    }
}

impl From<CellMove> for PlayerMove {
    fn from(mv: CellMove) -> Self {
        PlayerMove::Cell(mv)
    }
}

impl From<ChessMove> for PlayerMove {
    fn from(mv: ChessMove) -> Self {
        PlayerMove::Chess(mv)
    }
}

/// One entry of a match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    /// `(row, col)` for tic-tac-toe, UCI (`e2e4`, `e7e8q`) for chess
    pub notation: String,
    #[serde(rename = "move")]
    pub mv: PlayerMove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_move_json() {
        let mv: PlayerMove = serde_json::from_str(r#"{"row": 1, "col": 2}"#).unwrap();
        assert_eq!(mv, PlayerMove::cell(1, 2));
        assert_eq!(serde_json::to_string(&mv).unwrap(), r#"{"row":1,"col":2}"#);
    }

    #[test]
    fn test_chess_move_json() {
        let mv: PlayerMove =
            serde_json::from_str(r#"{"from_row":6,"from_col":4,"to_row":4,"to_col":4}"#).unwrap();
        assert_eq!(mv, PlayerMove::chess(GridCoord::new(6, 4), GridCoord::new(4, 4)));

        let promo: PlayerMove = serde_json::from_str(
            r#"{"from_row":1,"from_col":0,"to_row":0,"to_col":0,"promotion":"n"}"#,
        )
        .unwrap();
        let PlayerMove::Chess(promo) = promo else {
            panic!("expected a chess move");
        };
        assert_eq!(promo.promotion, Some(PromotionChoice::Knight));
    }

    #[test]
    fn test_negative_coordinates_decode() {
        let mv: PlayerMove = serde_json::from_str(r#"{"row": -1, "col": 0}"#).unwrap();
        assert_eq!(mv, PlayerMove::cell(-1, 0));
    }

    #[test]
    fn test_promotion_choice_conversions() {
        assert_eq!(PieceType::from(PromotionChoice::Rook), PieceType::Rook);
        assert_eq!(PromotionChoice::try_from(PieceType::Bishop), Ok(PromotionChoice::Bishop));
        assert!(PromotionChoice::try_from(PieceType::King).is_err());
    }

    #[test]
    fn test_move_record_field_names() {
        let record = MoveRecord {
            side: Side::First,
            notation: "(1, 1)".to_string(),
            mv: PlayerMove::cell(1, 1),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["side"], "first");
        assert_eq!(json["move"]["row"], 1);
    }
}
