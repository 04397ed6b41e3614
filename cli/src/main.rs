mod command;
mod config;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use minestake_core::{PlacementStrategy, RoundEngine, Wallet};
use rust_decimal::Decimal;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::command::Command;
use crate::config::Config;
use crate::render::TerminalSink;
use crate::session::{Flow, Session};

#[derive(Parser, Debug)]
#[command(version, about = "Bet on a 5x5 minefield and cash out before hitting a mine")]
struct Args {
    #[command(flatten)]
    verbose: Verbosity,

    /// TOML file with wallet and game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,

    /// Starting balance, overrides the config file
    #[arg(long)]
    balance: Option<Decimal>,

    /// How mines are placed on new boards
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Print every round event as a JSON line
    #[arg(long)]
    events: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Rejection,
    Shuffle,
}

impl From<StrategyArg> for PlacementStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Rejection => PlacementStrategy::Rejection,
            StrategyArg::Shuffle => PlacementStrategy::PartialShuffle,
        }
    }
}

fn init_logging(verbose: &Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // RUST_LOG wins over -v/-q when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    log::debug!("config: {:?}", config);

    let balance = args.balance.unwrap_or(config.wallet.starting_balance);
    anyhow::ensure!(
        !balance.is_sign_negative(),
        "Starting balance cannot be negative"
    );
    let strategy = args
        .strategy
        .map(PlacementStrategy::from)
        .unwrap_or(config.game.strategy);
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let sink = TerminalSink::new(io::stdout(), args.events);
    let engine = RoundEngine::new(Wallet::new(balance), sink, Vec::new(), seed)
        .with_strategy(strategy)
        .with_currency(config.wallet.currency);
    let mut session = Session::new(engine, config.game.default_mines);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        session.execute(Command::Help);
    }
    session.execute(Command::Balance);

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            session.prompt();
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Could not read from stdin")?;
        if session.handle_line(&line) == Flow::Quit {
            break;
        }
    }

    session.execute(Command::History);
    Ok(())
}
