//! Engine autoplay.
//!
//! Plays whole matches with the engine on the engine seat and either a
//! second engine or a seeded random player on the human seat. Matches are
//! independent, so they run in parallel; each one is single-threaded and
//! deterministic for its seed.

use anyhow::{Context, Result};
use arena::{
    BoardState, GameType, MatchResult, MatchSnapshot, PlayerMove, ResolvedMove, TurnController,
};
use arena_core::Game;
use arena_search::games::TicTacToe;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Who takes the human seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Opponent {
    Engine,
    Random,
}

/// One finished (or abandoned) match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub result: MatchResult,
    pub plies: usize,
    pub moves: Vec<String>,
}

/// Totals over all matches.
#[derive(Clone, Debug, Serialize)]
pub struct AutoplayReport {
    pub game_type: GameType,
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Matches stopped at the ply cap
    pub unfinished: usize,
    pub average_plies: f64,
    pub matches: Vec<MatchSummary>,
}

impl AutoplayReport {
    fn new(game_type: GameType, matches: Vec<MatchSummary>) -> Self {
        let count = |result: MatchResult| matches.iter().filter(|m| m.result == result).count();
        let total_plies: usize = matches.iter().map(|m| m.plies).sum();
        Self {
            game_type,
            games: matches.len(),
            first_wins: count(MatchResult::FirstWins),
            second_wins: count(MatchResult::SecondWins),
            draws: count(MatchResult::Draw),
            unfinished: count(MatchResult::Undecided),
            average_plies: if matches.is_empty() {
                0.0
            } else {
                total_plies as f64 / matches.len() as f64
            },
            matches,
        }
    }
}

/// Play `games` matches in parallel.
pub fn run(
    controller: &TurnController,
    game_type: GameType,
    games: usize,
    opponent: Opponent,
    seed: u64,
    max_plies: usize,
) -> Result<AutoplayReport> {
    let matches = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_match(controller, game_type, opponent, game_seed, max_plies)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(AutoplayReport::new(game_type, matches))
}

/// Play one match to completion or to `max_plies`.
pub fn play_match(
    controller: &TurnController,
    game_type: GameType,
    opponent: Opponent,
    seed: u64,
    max_plies: usize,
) -> Result<MatchSummary> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut snapshot = controller.new_match(game_type)?;

    while !snapshot.is_completed() && snapshot.history().len() < max_plies {
        let to_move = snapshot.position().side_to_move();
        snapshot = match opponent {
            Opponent::Random if to_move == snapshot.human_side() => {
                let mv = random_move(&snapshot, &mut rng)
                    .context("random player has no legal move")?;
                controller.submit_move(&snapshot, &mv, to_move)?.snapshot
            }
            _ => controller.engine_move(&snapshot)?.snapshot,
        };
    }

    debug!(seed, result = ?snapshot.result(), plies = snapshot.history().len(), "autoplay match done");
    Ok(MatchSummary {
        seed,
        result: snapshot.result(),
        plies: snapshot.history().len(),
        moves: snapshot.history().iter().map(|r| r.notation.clone()).collect(),
    })
}

/// A uniformly random legal move for the side to move.
fn random_move(snapshot: &MatchSnapshot, rng: &mut ChaCha8Rng) -> Option<PlayerMove> {
    let moves: Vec<ResolvedMove> = match snapshot.position() {
        BoardState::TicTacToe(state) => TicTacToe
            .legal_actions(state)
            .into_iter()
            .map(ResolvedMove::TicTacToe)
            .collect(),
        BoardState::Chess(pos) => pos.legal_moves().into_iter().map(ResolvedMove::Chess).collect(),
    };
    moves.choose(rng).map(|mv| mv.to_player_move())
}
