//! Arena Core - Game abstractions and common types
//!
//! This crate provides the `Game` capability trait that every rules crate
//! implements so that a single search engine can play all of them.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Side`] - One of the two players (first mover / second mover)
//! - [`Outcome`] - Final result of a finished game
//! - [`Score`] - Search score with the mate-distance convention

mod error;
mod game;
mod types;

pub use error::{CoreError, Result};
pub use game::Game;
pub use types::{Outcome, Score, Side};
