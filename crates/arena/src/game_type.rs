use std::fmt;

use serde::{Deserialize, Serialize};

/// The games the arena can host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    TicTacToe,
    Chess,
}

impl GameType {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameType::TicTacToe => "tic_tac_toe",
            GameType::Chess => "chess",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
