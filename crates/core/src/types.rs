//! Domain types shared by every game.
//!
//! - Side: which of the two players
//! - Outcome: how a finished game ended
//! - Score: search scores with a mate band that dominates static evaluation

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// `First` moves first: X in tic-tac-toe, White in chess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Returns the opposing side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Returns the index (0 for First, 1 for Second)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// The winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            Outcome::Draw => None,
        }
    }

    /// Score of this outcome for `perspective`, `ply` half-moves below the root.
    ///
    /// Wins found sooner score higher; losses found later score higher.
    pub fn score_for(self, perspective: Side, ply: u32) -> i32 {
        match self {
            Outcome::Win(side) if side == perspective => Score::win_in(ply),
            Outcome::Win(_) => Score::loss_in(ply),
            Outcome::Draw => Score::DRAW,
        }
    }
}

/// Search score helpers.
///
/// Scores are plain `i32`. Anything with absolute value at or above
/// [`Score::MATE_THRESHOLD`] is a forced win or loss; static evaluations
/// stay far below it.
pub struct Score;

impl Score {
    /// Score of an immediate win at the root.
    pub const MATE: i32 = 1_000_000;

    /// Scores at or beyond this magnitude are decided games.
    pub const MATE_THRESHOLD: i32 = Self::MATE - 1_000;

    /// Score for a draw.
    pub const DRAW: i32 = 0;

    /// Window bound strictly larger than any reachable score.
    pub const INFINITY: i32 = Self::MATE + 1;

    /// Score of a win `ply` half-moves from the root.
    #[inline]
    pub const fn win_in(ply: u32) -> i32 {
        Self::MATE - ply as i32
    }

    /// Score of a loss `ply` half-moves from the root.
    #[inline]
    pub const fn loss_in(ply: u32) -> i32 {
        -(Self::MATE - ply as i32)
    }

    /// True if `score` represents a forced result rather than a static estimate.
    #[inline]
    pub const fn is_decisive(score: i32) -> bool {
        score >= Self::MATE_THRESHOLD || score <= -Self::MATE_THRESHOLD
    }
}
