//! Interactive entry point: parses the command line, opens the game-trace
//! file and runs the session loop on stdin/stdout.

use std::io;
use std::path::Path;

use anyhow::bail;
use clap::Parser;

use ai_wargame::engine::trace::{open_trace_file, Tee};
use ai_wargame::engine::Engine;
use ai_wargame::evaluation::Heuristic;
use ai_wargame::game::board::{MAX_DIM, MIN_DIM};
use ai_wargame::game::options::{GameType, Options};

/// Turn-based wargame: humans, computer players or a remote broker on either
/// side.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Maximum search depth.
    #[arg(long)]
    max_depth: Option<u8>,
    /// Shallowest search depth; the first iterative-deepening pass always
    /// completes.
    #[arg(long)]
    min_depth: Option<u8>,
    /// Maximum search time per move, in seconds.
    #[arg(long)]
    max_time: Option<f64>,
    /// Turn limit after which the defender wins by default.
    #[arg(long)]
    max_turns: Option<u16>,
    /// Game type: auto|attacker|defender|manual.
    #[arg(long, default_value = "manual")]
    game_type: GameType,
    /// Static evaluator: trivial|material|positional.
    #[arg(long, default_value = "material")]
    heuristic: Heuristic,
    /// Disable alpha-beta pruning and search with plain minimax.
    #[arg(long)]
    minimax: bool,
    /// Board dimension.
    #[arg(long)]
    dim: Option<u8>,
    /// Play via a game broker at this URL.
    #[arg(long)]
    broker: Option<String>,
    /// Do not write the game trace to a file.
    #[arg(long)]
    no_file_output: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ai_wargame::print_engine_info();

    let mut options = Options {
        game_type: cli.game_type,
        heuristic: cli.heuristic,
        broker: cli.broker,
        ..Options::default()
    };
    if let Some(max_depth) = cli.max_depth {
        options.max_depth = max_depth;
    }
    if let Some(min_depth) = cli.min_depth {
        options.min_depth = min_depth;
    }
    if let Some(max_time) = cli.max_time {
        if max_time <= 0.0 {
            bail!("search time limit should be positive, got {max_time}");
        }
        options.max_time = Some(max_time);
    }
    if let Some(max_turns) = cli.max_turns {
        options.max_turns = Some(max_turns);
    }
    if let Some(dim) = cli.dim {
        if !(MIN_DIM..=MAX_DIM).contains(&dim) {
            bail!("board dimension should be within {MIN_DIM}..={MAX_DIM}, got {dim}");
        }
        options.dim = dim;
    }
    if cli.minimax {
        options.alpha_beta = false;
    }

    let trace = if cli.no_file_output {
        None
    } else {
        let (path, file) = open_trace_file(Path::new("."), &options)?;
        println!("Writing game output to \"{}\"", path.display());
        Some(file)
    };

    let stdin = io::stdin();
    let output = Tee::new(io::stdout(), trace);
    Engine::new(options, stdin.lock(), output).run()
}
