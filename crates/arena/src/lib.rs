//! Arena - human versus engine matches
//!
//! This crate ties the rules crates and the search together behind a
//! snapshot-in, snapshot-out turn controller:
//!
//! - [`TurnController`] validates a player's move, applies it, and plays
//!   the engine's reply
//! - [`MatchSnapshot`] / [`TurnReport`] are the serde wire types
//! - [`MatchError`] carries a [`ReasonCode`] for every rejection
//! - [`MemoryStore`] is an in-process [`MatchStore`] with versioned saves
//!
//! # Example
//!
//! ```
//! use arena::{GameType, PlayerMove, TurnController};
//! use arena_core::Side;
//!
//! let controller = TurnController::default();
//! let snapshot = controller.new_match(GameType::TicTacToe).unwrap();
//! let report = controller
//!     .submit_move(&snapshot, &PlayerMove::cell(1, 1), Side::First)
//!     .unwrap();
//! assert_eq!(report.engine_move.unwrap().mv, PlayerMove::cell(0, 0));
//! ```

mod board;
mod config;
mod controller;
mod error;
mod game_type;
mod moves;
mod snapshot;
mod store;

pub use board::{BoardState, ResolvedMove};
pub use config::MatchConfig;
pub use controller::TurnController;
pub use error::{IllegalMoveReason, MatchError, ReasonCode, Result};
pub use game_type::GameType;
pub use moves::{CellMove, ChessMove, GridCoord, MoveRecord, PlayerMove, PromotionChoice};
pub use snapshot::{CheckFlags, MatchResult, MatchSnapshot, MatchStatus, TurnReport};
pub use store::{MatchId, MatchStore, MemoryStore, Versioned};
