use std::fmt::Debug;
use std::hash::Hash;

use crate::{Outcome, Side};

/// A two-player, perfect-information game.
///
/// This trait is the capability interface the search engine is written
/// against. Tic-tac-toe and chess both implement it; nothing in the search
/// knows which game it is playing.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., chess position)
    type State: Clone + Send;

    /// A game action (e.g., chess move)
    type Action: Clone + Copy + Send + Eq + Hash + Debug;

    /// Returns the canonical starting state
    fn initial_state(&self) -> Self::State;

    /// Returns the side whose turn it is
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Returns all legal actions from the given state.
    ///
    /// The order is deterministic: search tie-breaks rely on it.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (immutable operation).
    ///
    /// Must only be called with an action produced by `legal_actions` for the
    /// same state.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns the final outcome, or `None` while the game is in progress.
    fn outcome(&self, state: &Self::State) -> Option<Outcome>;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.outcome(state).is_some()
    }

    /// Static score of a non-terminal state from `perspective`'s point of view.
    ///
    /// Used at the search depth cutoff. Games that are always searched to the
    /// end can return 0.
    fn evaluate(&self, state: &Self::State, perspective: Side) -> i32;
}
