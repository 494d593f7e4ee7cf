use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use wrap_snake::game::{GameConfig, GameSession};
use wrap_snake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrapping grid, in the terminal")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in debug mode (slower ticks, next-head overlay)
    #[arg(long)]
    debug: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(length) = cli.length {
        config.initial_length = length;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("Invalid game configuration")?;
    session.set_debug(cli.debug);
    log::info!("Starting with {:?}", session.config());

    let mut play_mode = PlayMode::new(session);
    play_mode.run().await?;

    Ok(())
}
