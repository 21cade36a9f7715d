//! Games that live alongside the search.
//!
//! Chess has its own crate; tic-tac-toe is small enough to sit here and
//! doubles as the reference game for search tests.

pub mod tictactoe;

pub use tictactoe::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
