use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use settings::{Difficulty, Settings};

mod command;
mod render;
mod session;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start from a preset board
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    rows: Option<u8>,

    #[arg(long)]
    cols: Option<u8>,

    #[arg(long)]
    mines: Option<u16>,

    /// TOML settings file, overridden by the flags above
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            difficulty: self.difficulty,
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // also forwards `log` records from the engine
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let file_settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let (config, seed) = Settings::resolve(&[&file_settings, &args.settings()]);
    log::debug!("Resolved {:?}, seed {:?}", config, seed);

    let mut session = session::Session::start(config, seed)
        .with_context(|| format!("Cannot start a game with {config:?}"))?;

    session::run(&mut session, std::io::stdin().lock(), std::io::stdout().lock())
}
