//! Implementation of the `Game` trait for chess.

use arena_core::{Game, Outcome, Side};

use crate::{eval, ChessRules, GameResult, Move, Position};

/// Chess under a given rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chess {
    pub rules: ChessRules,
}

impl Chess {
    pub fn new(rules: ChessRules) -> Self {
        Chess { rules }
    }
}

impl From<GameResult> for Outcome {
    fn from(result: GameResult) -> Outcome {
        match result {
            GameResult::WhiteWins => Outcome::Win(Side::First),
            GameResult::BlackWins => Outcome::Win(Side::Second),
            GameResult::Draw(_) => Outcome::Draw,
        }
    }
}

impl Game for Chess {
    type State = Position;
    type Action = Move;

    fn initial_state(&self) -> Position {
        Position::starting()
    }

    fn side_to_move(&self, state: &Position) -> Side {
        state.side_to_move().into()
    }

    fn legal_actions(&self, state: &Position) -> Vec<Move> {
        state.legal_moves()
    }

    fn apply(&self, state: &Position, action: Move) -> Position {
        state.make_move(action)
    }

    fn outcome(&self, state: &Position) -> Option<Outcome> {
        self.rules.outcome(state).map(Outcome::from)
    }

    fn evaluate(&self, state: &Position, perspective: Side) -> i32 {
        eval::evaluate(state, perspective.into(), self.rules.piece_square_bonus)
    }
}
