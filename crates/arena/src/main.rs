//! Isolation CLI
//!
//! Play a single game between two agents and inspect the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use arena::{play_configured, AgentKind, ArenaConfig};
use clap::{Args, Parser, Subcommand};
use search_engine::Heuristic;

#[derive(Parser, Debug)]
#[command(name = "isolation", author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game and print the report
    Play(PlayArgs),
    /// Print the default configuration as TOML
    Config,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// TOML config file (defaults are used for anything it leaves out)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player one kind
    #[arg(long, value_enum)]
    p1: Option<AgentKind>,

    /// Player two kind
    #[arg(long, value_enum)]
    p2: Option<AgentKind>,

    /// Heuristic for both players
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Fixed search depth for both players (disables iterative deepening)
    #[arg(short, long)]
    depth: Option<u32>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Per-move time limit in milliseconds
    #[arg(short, long)]
    time_limit: Option<u64>,

    /// Write the game record to this JSON file
    #[arg(short, long)]
    save: Option<PathBuf>,
}

impl PlayArgs {
    fn resolve(&self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ArenaConfig::default(),
        };

        if let Some(kind) = self.p1 {
            config.player_one.kind = kind;
        }
        if let Some(kind) = self.p2 {
            config.player_two.kind = kind;
        }
        for player in [&mut config.player_one, &mut config.player_two] {
            if let Some(heuristic) = self.heuristic {
                player.search.heuristic = heuristic;
            }
            if let Some(depth) = self.depth {
                player.search.search_depth = depth;
                player.search.use_iterative_deepening = false;
            }
        }
        if let Some(width) = self.width {
            config.board.width = width;
        }
        if let Some(height) = self.height {
            config.board.height = height;
        }
        if let Some(time_limit) = self.time_limit {
            config.time_limit_ms = time_limit;
        }
        Ok(config)
    }
}

fn run_play(args: &PlayArgs) -> Result<()> {
    let config = args.resolve()?;
    log::debug!("resolved config: {:?}", config);

    let record = play_configured(&config)?;
    record.print_report();

    if let Some(path) = &args.save {
        record
            .save(path)
            .with_context(|| format!("saving record to {}", path.display()))?;
        println!("Record saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let outcome = match &cli.command {
        Command::Play(args) => run_play(args),
        Command::Config => ArenaConfig::default()
            .to_toml()
            .map(|text| print!("{}", text))
            .map_err(Into::into),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
