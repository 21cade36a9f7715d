//! Arena Chess - chess rules on a mailbox board
//!
//! Positions are 64-square arrays with value semantics: `make_move` returns
//! a new position and never touches the input. Move generation is
//! deterministic so the search can rely on generation order for
//! tie-breaking.

pub mod attacks;
pub mod eval;
mod game_impl;
mod grid;
mod movegen;
mod moves;
mod piece;
mod position;
mod rules;
mod square;

pub use game_impl::Chess;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, PieceType};
pub use position::{CastlingRights, Position, STARTING_FEN};
pub use rules::{ChessRules, DrawReason, GameResult};
pub use square::Square;
