use std::fmt;

use arena_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MatchId;

/// The closed set of rejection identifiers handed back to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NotYourTurn,
    IllegalMove,
    GameAlreadyCompleted,
    MatchNotFound,
    StaleSnapshot,
    Internal,
}

impl ReasonCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReasonCode::NotYourTurn => "NOT_YOUR_TURN",
            ReasonCode::IllegalMove => "ILLEGAL_MOVE",
            ReasonCode::GameAlreadyCompleted => "GAME_ALREADY_COMPLETED",
            ReasonCode::MatchNotFound => "MATCH_NOT_FOUND",
            ReasonCode::StaleSnapshot => "STALE_SNAPSHOT",
            ReasonCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submitted move was rejected as illegal.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalMoveReason {
    #[error("move format does not match the game being played")]
    WrongGame,

    #[error("coordinates are off the board")]
    OffBoard,

    #[error("cell is already occupied")]
    Occupied,

    #[error("no piece of the acting side on the origin square")]
    NoOwnPiece,

    #[error("the piece cannot reach that square")]
    UnreachableDestination,

    #[error("move would leave the king in check")]
    LeavesKingInCheck,

    #[error("promotion choice does not fit this move")]
    InvalidPromotion,
}

/// Errors returned by the turn controller and the match store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Illegal move: {0}")]
    IllegalMove(IllegalMoveReason),

    #[error("Game already completed")]
    GameAlreadyCompleted,

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("Stale snapshot: expected version {expected}, store has {found}")]
    StaleSnapshot { expected: u64, found: u64 },

    #[error("Engine error: {0}")]
    Engine(#[from] CoreError),

    #[error("Cannot decode snapshot: {0}")]
    Decode(String),
}

impl MatchError {
    /// Reason code reported to the caller
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            MatchError::NotYourTurn => ReasonCode::NotYourTurn,
            MatchError::IllegalMove(_) => ReasonCode::IllegalMove,
            MatchError::GameAlreadyCompleted => ReasonCode::GameAlreadyCompleted,
            MatchError::MatchNotFound(_) => ReasonCode::MatchNotFound,
            MatchError::StaleSnapshot { .. } => ReasonCode::StaleSnapshot,
            MatchError::Engine(_) | MatchError::Decode(_) => ReasonCode::Internal,
        }
    }
}

impl From<IllegalMoveReason> for MatchError {
    fn from(reason: IllegalMoveReason) -> Self {
        MatchError::IllegalMove(reason)
    }
}

/// Convenience Result type for match operations
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(MatchError::NotYourTurn.reason_code(), ReasonCode::NotYourTurn);
        assert_eq!(
            MatchError::IllegalMove(IllegalMoveReason::OffBoard).reason_code(),
            ReasonCode::IllegalMove
        );
        assert_eq!(
            MatchError::from(CoreError::NoLegalMoves).reason_code(),
            ReasonCode::Internal
        );
        assert_eq!(
            MatchError::StaleSnapshot { expected: 1, found: 2 }.reason_code(),
            ReasonCode::StaleSnapshot
        );
    }

    #[test]
    fn test_reason_code_wire_names() {
        for code in [
            ReasonCode::NotYourTurn,
            ReasonCode::IllegalMove,
            ReasonCode::GameAlreadyCompleted,
            ReasonCode::MatchNotFound,
            ReasonCode::StaleSnapshot,
            ReasonCode::Internal,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_error_messages() {
        let err = MatchError::IllegalMove(IllegalMoveReason::LeavesKingInCheck);
        assert_eq!(err.to_string(), "Illegal move: move would leave the king in check");
        assert_eq!(MatchError::MatchNotFound(MatchId(7)).to_string(), "Match 7 not found");
    }
}
