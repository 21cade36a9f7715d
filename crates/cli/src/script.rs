//! Parsing of scripted moves given on the command line.
//!
//! Tic-tac-toe moves are `row,col` (`1,1`); chess moves are UCI (`e2e4`,
//! `e7e8q`).

use anyhow::{bail, Context, Result};
use arena::{ChessMove, GameType, GridCoord, PlayerMove, PromotionChoice};
use arena_chess::Square;

pub fn parse_move(game_type: GameType, text: &str) -> Result<PlayerMove> {
    let text = text.trim();
    match game_type {
        GameType::TicTacToe => parse_cell(text),
        GameType::Chess => parse_uci(text),
    }
}

fn parse_cell(text: &str) -> Result<PlayerMove> {
    let (row, col) = text
        .split_once(',')
        .with_context(|| format!("expected row,col but got {text:?}"))?;
    let row = row.trim().parse().with_context(|| format!("bad row in {text:?}"))?;
    let col = col.trim().parse().with_context(|| format!("bad column in {text:?}"))?;
    Ok(PlayerMove::cell(row, col))
}

fn parse_uci(text: &str) -> Result<PlayerMove> {
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        bail!("expected a UCI move like e2e4 but got {text:?}");
    }
    let square = |s: &str| {
        Square::from_algebraic(s)
            .map(|sq| GridCoord::new(sq.grid_row(), sq.grid_col()))
            .with_context(|| format!("bad square {s:?} in {text:?}"))
    };
    let mut mv = ChessMove::new(square(&text[0..2])?, square(&text[2..4])?);
    if let Some(letter) = text.get(4..5) {
        mv = mv.with_promotion(match letter {
            "q" => PromotionChoice::Queen,
            "r" => PromotionChoice::Rook,
            "b" => PromotionChoice::Bishop,
            "n" => PromotionChoice::Knight,
            other => bail!("bad promotion piece {other:?} in {text:?}"),
        });
    }
    Ok(PlayerMove::Chess(mv))
}
