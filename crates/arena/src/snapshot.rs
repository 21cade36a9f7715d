//! Match snapshots and turn reports.

use arena_core::{Outcome, Side};
use serde::{Deserialize, Serialize};

use crate::{BoardState, GameType, MatchError, MoveRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Undecided,
    FirstWins,
    SecondWins,
    Draw,
}

impl MatchResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchResult::FirstWins => Some(Side::First),
            MatchResult::SecondWins => Some(Side::Second),
            MatchResult::Undecided | MatchResult::Draw => None,
        }
    }
}

impl From<Option<Outcome>> for MatchResult {
    fn from(outcome: Option<Outcome>) -> Self {
        match outcome {
            None => MatchResult::Undecided,
            Some(Outcome::Win(Side::First)) => MatchResult::FirstWins,
            Some(Outcome::Win(Side::Second)) => MatchResult::SecondWins,
            Some(Outcome::Draw) => MatchResult::Draw,
        }
    }
}

/// Whether each side's king is attacked. Chess only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFlags {
    pub first: bool,
    pub second: bool,
}

/// Everything the engine needs to continue a match.
///
/// Snapshots are only produced by the turn controller. History is
/// append-only and a completed snapshot is never advanced again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SnapshotRecord", try_from = "SnapshotRecord")]
pub struct MatchSnapshot {
    pub(crate) position: BoardState,
    pub(crate) human_side: Side,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) status: MatchStatus,
    pub(crate) result: MatchResult,
}

impl MatchSnapshot {
    pub(crate) fn new(position: BoardState, human_side: Side) -> Self {
        Self {
            position,
            human_side,
            history: Vec::new(),
            status: MatchStatus::InProgress,
            result: MatchResult::Undecided,
        }
    }

    pub fn game_type(&self) -> GameType {
        self.position.game_type()
    }

    pub fn position(&self) -> &BoardState {
        &self.position
    }

    pub fn human_side(&self) -> Side {
        self.human_side
    }

    pub fn engine_side(&self) -> Side {
        self.human_side.opposite()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Serialized form of a [`MatchSnapshot`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    position: BoardState,
    human_side: Side,
    history: Vec<MoveRecord>,
    status: MatchStatus,
    result: MatchResult,
}

impl From<MatchSnapshot> for SnapshotRecord {
    fn from(snapshot: MatchSnapshot) -> Self {
        Self {
            position: snapshot.position,
            human_side: snapshot.human_side,
            history: snapshot.history,
            status: snapshot.status,
            result: snapshot.result,
        }
    }
}

impl TryFrom<SnapshotRecord> for MatchSnapshot {
    type Error = MatchError;

    fn try_from(record: SnapshotRecord) -> Result<Self, MatchError> {
        // A completed match has a decided result and vice versa
        let decided = record.result != MatchResult::Undecided;
        if decided != (record.status == MatchStatus::Completed) {
            return Err(MatchError::Decode(format!(
                "status {:?} does not fit result {:?}",
                record.status, record.result
            )));
        }
        Ok(Self {
            position: record.position,
            human_side: record.human_side,
            history: record.history,
            status: record.status,
            result: record.result,
        })
    }
}

/// The consolidated answer to one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub snapshot: MatchSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_move: Option<MoveRecord>,
    pub is_game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_flags: Option<CheckFlags>,
}

impl TurnReport {
    pub(crate) fn new(snapshot: MatchSnapshot, engine_move: Option<MoveRecord>) -> Self {
        let is_game_over = snapshot.is_completed();
        Self {
            result: is_game_over.then_some(snapshot.result),
            check_flags: snapshot.position.check_flags(),
            engine_move,
            is_game_over,
            snapshot,
        }
    }
}
