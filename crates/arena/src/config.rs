//! Match configuration.

use arena_chess::ChessRules;
use arena_core::Side;
use arena_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::GameType;

/// Settings shared by every match a controller runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Side the human plays; the engine takes the other one
    pub human_side: Side,
    pub tictactoe_search: SearchConfig,
    pub chess_search: SearchConfig,
    pub chess_rules: ChessRules,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            human_side: Side::First,
            tictactoe_search: SearchConfig::for_tictactoe(),
            chess_search: SearchConfig::for_chess(),
            chess_rules: ChessRules::default(),
        }
    }
}

impl MatchConfig {
    /// Engine settings for `game_type`
    pub fn search_for(&self, game_type: GameType) -> SearchConfig {
        match game_type {
            GameType::TicTacToe => self.tictactoe_search,
            GameType::Chess => self.chess_search,
        }
    }

    pub fn with_human_side(mut self, side: Side) -> Self {
        self.human_side = side;
        self
    }
}
