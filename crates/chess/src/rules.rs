//! Terminal detection and the optional draw rules.

use serde::{Deserialize, Serialize};

use crate::{Color, Position};

/// The result of a chess game
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameResult {
    /// The winning color, if any
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }
}

/// Reason for a draw
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

/// Rule switches layered on top of checkmate and stalemate.
///
/// Everything is off by default: a game then ends only when the side to
/// move has no legal move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessRules {
    /// Draw once the halfmove clock reaches 100
    pub fifty_move_rule: bool,
    /// Draw when neither side has mating material
    pub insufficient_material: bool,
    /// Add piece-square bonuses to the material evaluation
    pub piece_square_bonus: bool,
}

impl ChessRules {
    /// All draw rules and the positional bonus enabled
    pub fn full() -> Self {
        ChessRules {
            fifty_move_rule: true,
            insufficient_material: true,
            piece_square_bonus: true,
        }
    }

    /// Get the game result if the position is terminal.
    pub fn outcome(&self, pos: &Position) -> Option<GameResult> {
        if !pos.has_legal_moves() {
            return Some(if pos.is_check() {
                match pos.side_to_move() {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                }
            } else {
                GameResult::Draw(DrawReason::Stalemate)
            });
        }

        if self.fifty_move_rule && pos.halfmove_clock() >= 100 {
            return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
        }
        if self.insufficient_material && pos.is_insufficient_material() {
            return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
        }

        None
    }
}

impl Position {
    /// Game result under the default rules (checkmate and stalemate only)
    pub fn outcome(&self) -> Option<GameResult> {
        ChessRules::default().outcome(self)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}
