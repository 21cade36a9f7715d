//! Command-line driver for arena matches.
//!
//! `autoplay` runs whole matches with the engine in parallel and prints a
//! JSON summary. `play` submits a scripted list of moves for the human seat
//! through an in-memory match store and prints the final turn report.

mod autoplay;
mod script;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use arena::{
    GameType, MatchConfig, MatchSnapshot, MatchStore, MemoryStore, TurnController, TurnReport,
};
use arena_core::Side;
use autoplay::Opponent;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play tic-tac-toe and chess against the arena engine.
#[derive(Parser)]
#[command(name = "arena-play")]
#[command(about = "Play tic-tac-toe and chess matches against the arena engine")]
struct Cli {
    /// JSON file with match settings; missing fields keep their defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play engine matches and print a summary.
    Autoplay {
        /// Game to play.
        #[arg(short, long, value_enum, default_value = "tic-tac-toe")]
        game: GameArg,

        /// Number of matches.
        #[arg(short = 'n', long, default_value = "10")]
        games: usize,

        /// Who plays the human seat.
        #[arg(long, value_enum, default_value = "engine")]
        opponent: Opponent,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Stop a match after this many plies.
        #[arg(long, default_value = "300")]
        max_plies: usize,

        /// Override the engine search depth for the chosen game.
        #[arg(short, long)]
        depth: Option<u32>,

        /// Write the summary here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Submit scripted moves for the human seat.
    Play {
        /// Game to start (ignored with --snapshot).
        #[arg(short, long, value_enum, default_value = "tic-tac-toe")]
        game: GameArg,

        /// Side the human plays.
        #[arg(long, value_enum)]
        human_side: Option<SideArg>,

        /// Resume from a snapshot JSON file instead of a new match.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Moves: `row,col` for tic-tac-toe, UCI (`e2e4`) for chess.
        moves: Vec<String>,

        /// Write the final report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GameArg {
    TicTacToe,
    Chess,
}

impl From<GameArg> for GameType {
    fn from(arg: GameArg) -> GameType {
        match arg {
            GameArg::TicTacToe => GameType::TicTacToe,
            GameArg::Chess => GameType::Chess,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    First,
    Second,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Side {
        match arg {
            SideArg::First => Side::First,
            SideArg::Second => Side::Second,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let file = File::open(path).with_context(|| format!("Failed to open config: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config: {:?}", path))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to write JSON")?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_autoplay(
    mut config: MatchConfig,
    game: GameType,
    games: usize,
    opponent: Opponent,
    seed: u64,
    max_plies: usize,
    depth: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(depth) = depth {
        match game {
            GameType::TicTacToe => config.tictactoe_search.max_depth = depth,
            GameType::Chess => config.chess_search.max_depth = depth,
        }
    }
    info!(%game, games, ?opponent, depth = config.search_for(game).max_depth, "starting autoplay");

    let start = Instant::now();
    let controller = TurnController::new(config);
    let report = autoplay::run(&controller, game, games, opponent, seed, max_plies)?;

    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        first_wins = report.first_wins,
        second_wins = report.second_wins,
        draws = report.draws,
        unfinished = report.unfinished,
        "autoplay finished"
    );
    write_json(&report, output.as_deref())
}

fn cmd_play(
    mut config: MatchConfig,
    game: GameType,
    human_side: Option<Side>,
    snapshot: Option<PathBuf>,
    moves: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let snapshot = match snapshot {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("Failed to open snapshot: {:?}", path))?;
            let snapshot: MatchSnapshot = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse snapshot: {:?}", path))?;
            config.human_side = snapshot.human_side();
            snapshot
        }
        None => {
            if let Some(side) = human_side {
                config.human_side = side;
            }
            TurnController::new(config).new_match(game)?
        }
    };

    let controller = TurnController::new(config);
    let game = snapshot.game_type();
    let store = MemoryStore::new();
    let id = store.create(snapshot);

    let mut report: Option<TurnReport> = None;
    for text in &moves {
        let mv = script::parse_move(game, text)?;
        let turn = controller
            .submit_to_store(&store, id, &mv, config.human_side)
            .map_err(|err| {
                let code = err.reason_code();
                anyhow::Error::new(err).context(format!("{code}: move {text:?} rejected"))
            })?;
        if let Some(engine) = &turn.engine_move {
            info!(human = %text, engine = %engine.notation, "turn played");
        }
        report = Some(turn);
    }

    let report = match report {
        Some(report) => report,
        None => controller.inspect(&store.load(id)?.value),
    };
    write_json(&report, output.as_deref())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Autoplay {
            game,
            games,
            opponent,
            seed,
            max_plies,
            depth,
            output,
        } => cmd_autoplay(
            config,
            game.into(),
            games,
            opponent,
            seed,
            max_plies,
            depth,
            output,
        ),

        Commands::Play {
            game,
            human_side,
            snapshot,
            moves,
            output,
        } => cmd_play(
            config,
            game.into(),
            human_side.map(Into::into),
            snapshot,
            moves,
            output,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_autoplay_args() {
        let cli = Cli::parse_from([
            "arena-play", "autoplay", "--game", "chess", "-n", "4", "--opponent", "random",
            "--depth", "2",
        ]);
        let Commands::Autoplay {
            game,
            games,
            opponent,
            depth,
            ..
        } = cli.command
        else {
            panic!("expected autoplay");
        };
        assert_eq!(GameType::from(game), GameType::Chess);
        assert_eq!(games, 4);
        assert_eq!(opponent, Opponent::Random);
        assert_eq!(depth, Some(2));
    }

    #[test]
    fn test_parse_play_args() {
        let cli = Cli::parse_from(["arena-play", "play", "--human-side", "second", "1,1", "0,2"]);
        let Commands::Play {
            game,
            human_side,
            moves,
            ..
        } = cli.command
        else {
            panic!("expected play");
        };
        assert_eq!(GameType::from(game), GameType::TicTacToe);
        assert!(matches!(human_side, Some(SideArg::Second)));
        assert_eq!(moves, ["1,1", "0,2"]);
    }

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), MatchConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/arena.json"))).is_err());
    }
}
