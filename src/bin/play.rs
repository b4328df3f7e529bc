//! Play Othello against the trained policy in the terminal.
//!
//! Usage:
//!   play --board-size 8 --human-color white
//!
//! Enter moves as column letter + row number (`D3`). The bot loads
//! `<model-dir>/model_<N>x<N>.bin` if present, otherwise plays with fresh
//! weights.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use othello_selfplay::core::{Color, TrainerConfig};
use othello_selfplay::play::{channel, parse_coordinate, play_game, MoveRequest, RequestReceiver};
use othello_selfplay::rules::OthelloEngine;
use othello_selfplay::training::{load_or_init_policy, ActionSelector};

#[derive(Parser)]
#[command(name = "play", about = "Play Othello against the trained policy")]
struct Cli {
    /// TOML file with trainer settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    board_size: Option<usize>,

    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Your color (black moves first)
    #[arg(long, default_value = "black")]
    human_color: Color,

    #[arg(long, short)]
    verbose: bool,
}

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
    Ok(())
}

/// Presentation worker: show each request and read the answer from stdin.
fn terminal_worker(requests: RequestReceiver) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for request in requests {
        if prompt(&request).is_err() {
            break;
        }
        let mv = loop {
            let Some(Ok(line)) = lines.next() else {
                debug!("stdin closed");
                return;
            };
            match parse_coordinate(&line, request.board().size()) {
                Some(mv) => break mv,
                None => {
                    println!("Could not read '{}'; try e.g. D3", line.trim());
                }
            }
        };
        if request.resolve(mv).is_err() {
            break;
        }
    }
}

fn prompt(request: &MoveRequest) -> io::Result<()> {
    let moves: Vec<String> = request.valid_moves().iter().map(|m| m.to_string()).collect();
    let mut out = io::stdout().lock();
    writeln!(out)?;
    writeln!(out, "{}", request.board())?;
    writeln!(out, "Legal: {}", moves.join(" "))?;
    write!(out, "{} to move > ", request.color())?;
    out.flush()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => TrainerConfig::from_toml_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TrainerConfig::default(),
    };
    if let Some(size) = cli.board_size {
        config = config.with_board_size(size);
    }
    if let Some(dir) = cli.model_dir {
        config = config.with_model_dir(dir);
    }
    config.validate().context("invalid settings")?;

    let engine = OthelloEngine::new(config.board_size);
    let policy = load_or_init_policy(&config).context("loading model")?;
    let mut bot = ActionSelector::new(engine, policy, &config);

    let (mut human, requests) = channel(engine);
    let worker = thread::spawn(move || terminal_worker(requests));

    let record = match cli.human_color {
        Color::Black => play_game(&engine, &mut human, &mut bot),
        Color::White => play_game(&engine, &mut bot, &mut human),
    }
    .context("game aborted")?;

    // The bridge must go away before joining, so the worker's loop ends.
    drop(human);
    let _ = worker.join();

    println!();
    println!("{}", record.board);
    info!(
        "{} ({} black, {} white)",
        record.outcome,
        record.board.count(Color::Black),
        record.board.count(Color::White)
    );
    match record.outcome.winner() {
        Some(c) if c == cli.human_color => println!("You win!"),
        Some(_) => println!("You lose."),
        None => println!("Draw."),
    }
    Ok(())
}
