//! Minimax search with alpha-beta pruning.
//!
//! The search is written once against [`Game`] and plays for whichever side
//! is to move at the root. Scores are always from that side's point of
//! view: the root side maximizes, its opponent minimizes.

use arena_core::{CoreError, Game, Result, Score, Side};
use tracing::debug;

use crate::SearchConfig;

/// Outcome of a search from one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<A> {
    /// The chosen action (first in generation order among equals)
    pub best_action: A,
    /// Score of `best_action` for the side to move at the root
    pub score: i32,
    /// Nodes visited, root included
    pub nodes: u64,
}

/// Depth-limited minimax with an alpha-beta window.
#[derive(Clone, Debug, Default)]
pub struct Minimax {
    config: SearchConfig,
}

/// Per-search bookkeeping
struct SearchContext<'a, G: Game> {
    game: &'a G,
    root_side: Side,
    max_nodes: Option<u64>,
    nodes: u64,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `state` and return the best action for the side to move.
    ///
    /// Returns [`CoreError::NoLegalMoves`] if the game is already over or
    /// the side to move has nothing to play.
    pub fn search<G: Game>(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        if game.is_terminal(state) {
            return Err(CoreError::NoLegalMoves);
        }
        let actions = game.legal_actions(state);
        if actions.is_empty() {
            return Err(CoreError::NoLegalMoves);
        }

        let depth = self.config.effective_depth();
        let mut ctx = SearchContext {
            game,
            root_side: game.side_to_move(state),
            max_nodes: self.config.max_nodes,
            nodes: 1,
        };

        let mut best: Option<(G::Action, i32)> = None;
        let mut alpha = -Score::INFINITY;
        let beta = Score::INFINITY;

        for action in actions {
            let child = game.apply(state, action);
            let score = ctx.alphabeta(&child, depth - 1, 1, alpha, beta, false);
            // Strict improvement only: ties keep the earlier action.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((action, score));
                alpha = alpha.max(score);
            }
        }

        let (best_action, score) = best.ok_or(CoreError::NoLegalMoves)?;
        debug!(
            side = %ctx.root_side,
            depth,
            nodes = ctx.nodes,
            score,
            best = ?best_action,
            "search finished"
        );

        Ok(SearchResult {
            best_action,
            score,
            nodes: ctx.nodes,
        })
    }
}

impl<G: Game> SearchContext<'_, G> {
    fn budget_exhausted(&self) -> bool {
        self.max_nodes.is_some_and(|max| self.nodes >= max)
    }

    /// Fail-soft alpha-beta. `ply` is the distance from the root and is
    /// used to prefer quicker wins and slower losses.
    fn alphabeta(
        &mut self,
        state: &G::State,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if let Some(outcome) = self.game.outcome(state) {
            return outcome.score_for(self.root_side, ply);
        }
        if depth == 0 || self.budget_exhausted() {
            return self.game.evaluate(state, self.root_side);
        }

        let actions = self.game.legal_actions(state);

        if maximizing {
            let mut max_eval = -Score::INFINITY;
            for action in actions {
                let child = self.game.apply(state, action);
                let eval = self.alphabeta(&child, depth - 1, ply + 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if alpha >= beta {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = Score::INFINITY;
            for action in actions {
                let child = self.game.apply(state, action);
                let eval = self.alphabeta(&child, depth - 1, ply + 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if alpha >= beta {
                    break;
                }
            }
            min_eval
        }
    }
}
