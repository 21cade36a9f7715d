//! The match turn controller.
//!
//! A turn validates the human's move, applies it, and, if the game is still
//! running, lets the engine answer. The caller's snapshot is never touched:
//! every operation returns a fresh one.

use arena_core::Side;
use tracing::{debug, info, instrument, warn};

use crate::{
    BoardState, GameType, GridCoord, MatchConfig, MatchError, MatchId, MatchResult,
    MatchSnapshot, MatchStatus, MatchStore, PlayerMove, Result, TurnReport,
};

/// Drives matches between a human and the engine.
#[derive(Clone, Debug, Default)]
pub struct TurnController {
    config: MatchConfig,
}

impl TurnController {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Start a match from the canonical position.
    ///
    /// When the human plays the second side the engine opens immediately.
    pub fn new_match(&self, game_type: GameType) -> Result<MatchSnapshot> {
        let snapshot = MatchSnapshot::new(BoardState::starting(game_type), self.config.human_side);
        if snapshot.engine_side() == Side::First {
            let report = self.engine_move(&snapshot)?;
            return Ok(report.snapshot);
        }
        Ok(snapshot)
    }

    /// Derived flags for a snapshot without playing a move.
    pub fn inspect(&self, snapshot: &MatchSnapshot) -> TurnReport {
        TurnReport::new(snapshot.clone(), None)
    }

    /// Destinations of the piece on `origin`, if it belongs to the side to move.
    pub fn legal_destinations_from(
        &self,
        snapshot: &MatchSnapshot,
        origin: GridCoord,
    ) -> Vec<GridCoord> {
        if snapshot.is_completed() {
            return Vec::new();
        }
        snapshot.position.legal_destinations_from(origin)
    }

    /// Play the human's move and the engine's reply.
    #[instrument(
        level = "debug",
        skip_all,
        fields(game_type = %snapshot.game_type(), acting_side = %acting_side)
    )]
    pub fn submit_move(
        &self,
        snapshot: &MatchSnapshot,
        mv: &PlayerMove,
        acting_side: Side,
    ) -> Result<TurnReport> {
        self.ensure_in_progress(snapshot)?;

        let to_move = snapshot.position.side_to_move();
        if acting_side != snapshot.human_side || acting_side != to_move {
            warn!(%to_move, "move submitted out of turn");
            return Err(MatchError::NotYourTurn);
        }

        let resolved = snapshot.position.resolve(mv).map_err(|reason| {
            warn!(?mv, %reason, "illegal move rejected");
            MatchError::IllegalMove(reason)
        })?;

        let mut next = snapshot.clone();
        next.position = snapshot.position.apply(resolved);
        next.history.push(resolved.record(acting_side));
        self.settle(&mut next);

        if next.is_completed() || next.position.side_to_move() != next.engine_side() {
            return Ok(TurnReport::new(next, None));
        }
        self.engine_move(&next)
    }

    /// Let the engine play one move for the side to move.
    ///
    /// The human side is not consulted, which lets a driver pit the engine
    /// against itself.
    pub fn engine_move(&self, snapshot: &MatchSnapshot) -> Result<TurnReport> {
        self.ensure_in_progress(snapshot)?;

        let side = snapshot.position.side_to_move();
        let reply = snapshot.position.engine_reply(&self.config)?;
        let record = reply.record(side);
        debug!(%side, notation = %record.notation, "engine replied");

        let mut next = snapshot.clone();
        next.position = snapshot.position.apply(reply);
        next.history.push(record.clone());
        self.settle(&mut next);
        Ok(TurnReport::new(next, Some(record)))
    }

    /// Load, play a turn, and save back under optimistic concurrency.
    pub fn submit_to_store<S: MatchStore + ?Sized>(
        &self,
        store: &S,
        id: MatchId,
        mv: &PlayerMove,
        acting_side: Side,
    ) -> Result<TurnReport> {
        let current = store.load(id)?;
        let report = self.submit_move(&current.value, mv, acting_side)?;
        store.save(id, current.version, report.snapshot.clone())?;
        Ok(report)
    }

    fn ensure_in_progress(&self, snapshot: &MatchSnapshot) -> Result<()> {
        if snapshot.is_completed() || snapshot.position.outcome(self.config.chess_rules).is_some() {
            warn!("move submitted to a finished match");
            return Err(MatchError::GameAlreadyCompleted);
        }
        Ok(())
    }

    fn settle(&self, snapshot: &mut MatchSnapshot) {
        let outcome = snapshot.position.outcome(self.config.chess_rules);
        if outcome.is_some() {
            snapshot.status = MatchStatus::Completed;
            snapshot.result = MatchResult::from(outcome);
            info!(
                game_type = %snapshot.game_type(),
                result = ?snapshot.result,
                plies = snapshot.history.len(),
                "match completed"
            );
        }
    }
}
