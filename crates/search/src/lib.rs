//! Game-agnostic adversarial search.
//!
//! This crate provides a minimax search with alpha-beta pruning that works
//! with any game implementing the `arena_core::Game` trait.
//!
//! # Example
//!
//! ```
//! use arena_core::Game;
//! use arena_search::{games::{TicTacToe, TicTacToeAction}, Minimax, SearchConfig};
//!
//! let game = TicTacToe;
//! let state = game.apply(&game.initial_state(), TicTacToeAction(4));
//!
//! let search = Minimax::new(SearchConfig::for_tictactoe());
//! let result = search.search(&game, &state).expect("game in progress");
//! assert_eq!(result.best_action, TicTacToeAction(0));
//! ```

pub mod config;
pub mod games;
pub mod minimax;

pub use config::SearchConfig;
pub use minimax::{Minimax, SearchResult};
