//! Self-play training for Othello.
//!
//! Usage:
//!   train --board-size 8 --games 200 --epochs 20
//!   train --config train.toml --model-dir models --quiet
//!
//! Settings come from the defaults, then the TOML file given by `--config`,
//! then any flags on the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use othello_selfplay::core::{Color, TrainerConfig};
use othello_selfplay::rules::OthelloEngine;
use othello_selfplay::training::{load_or_init_policy, SelfPlayTrainer};

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(name = "train", about = "Self-play policy training for Othello")]
struct Cli {
    /// TOML file with trainer settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length (even, 4..=26)
    #[arg(long)]
    board_size: Option<usize>,

    /// Self-play games to play
    #[arg(long)]
    games: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    #[arg(long)]
    epochs: Option<usize>,

    /// Directory for saved models
    #[arg(long)]
    model_dir: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Color whose results are counted (black or white)
    #[arg(long)]
    tracked_color: Option<Color>,

    /// Debug-level logging
    #[arg(long, short)]
    verbose: bool,

    /// Don't log every game
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => TrainerConfig::from_toml_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => TrainerConfig::default(),
        };

        if let Some(size) = self.board_size {
            config = config.with_board_size(size);
        }
        if let Some(games) = self.games {
            config = config.with_games(games);
        }
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if let Some(epochs) = self.epochs {
            config = config.with_epochs(epochs);
        }
        if let Some(dir) = self.model_dir {
            config = config.with_model_dir(dir);
        }
        if let Some(lr) = self.learning_rate {
            config = config.with_learning_rate(lr);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(color) = self.tracked_color {
            config = config.with_tracked_color(color);
        }
        if self.quiet {
            config = config.with_verbose(false);
        }

        config.validate().context("invalid trainer settings")?;
        Ok(config)
    }
}

// ============================================================
// Logging
// ============================================================

fn init_logger(verbose: bool) -> Result<()> {
    use simplelog::*;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("initialising logger")?;

    debug!("Logger successfully initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;
    let config = cli.into_config()?;

    info!(
        "Training on {0}x{0}: {1} games, batch size {2}, {3} epochs",
        config.board_size, config.games, config.batch_size, config.epochs
    );

    let policy = load_or_init_policy(&config).context("loading model")?;
    let engine = OthelloEngine::new(config.board_size);
    let mut trainer = SelfPlayTrainer::new(engine, policy, &config)?;

    let summary = trainer.run_configured().context("self-play training")?;
    info!(
        "Done: {} games, {} examples",
        summary.games, summary.examples
    );
    if let Some(path) = &summary.model_path {
        info!("Model at {}", path.display());
    }
    Ok(())
}
