//! Strictly Unblock - command-line host
//!
//! Validates, prints and replays sliding-block puzzle levels.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_unblock::{ExitRule, Puzzle, PuzzleError, VehicleId};
use strictly_unblock_cli::{HostConfig, load_level, report};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HostConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check { level } => run_check(&level),
        Command::Show { level } => run_show(&level, &config),
        Command::Play {
            level,
            moves,
            exit_rule,
            quiet,
        } => {
            let config = match exit_rule {
                Some(rule) => config.with_exit_rule(rule),
                None => config,
            };
            let config = if quiet {
                config.with_show_board(false)
            } else {
                config
            };
            run_play(&level, &moves, &config)
        }
    }
}

/// Validate a level and print its summary
#[instrument(skip(path), fields(path = %path.display()))]
fn run_check(path: &Path) -> Result<()> {
    let level = load_level(path)?;
    level
        .validate()
        .with_context(|| format!("Level {} is invalid", path.display()))?;

    info!("Level is valid");
    println!("{}", report::level_summary(&level));
    println!("OK");
    Ok(())
}

/// Print the initial board and vehicle table
#[instrument(skip(path, config), fields(path = %path.display()))]
fn run_show(path: &Path, config: &HostConfig) -> Result<()> {
    let level = load_level(path)?;
    let puzzle = Puzzle::with_exit_rule(level, *config.exit_rule())?;

    println!("{}", report::level_summary(puzzle.level()));
    println!("{}", report::vehicle_table(&puzzle));
    println!();
    print!("{}", puzzle.board().display());
    Ok(())
}

/// Replay a move sequence and print each outcome
#[instrument(skip(path, moves, config), fields(path = %path.display(), moves = moves.len()))]
fn run_play(path: &Path, moves: &[usize], config: &HostConfig) -> Result<()> {
    let level = load_level(path)?;
    let exit_rule: ExitRule = *config.exit_rule();
    let mut puzzle = Puzzle::with_exit_rule(level, exit_rule)?;
    info!(%exit_rule, "Starting replay");

    if *config.show_board() {
        print!("{}", puzzle.board().display());
        println!();
    }

    for (index, &pick) in moves.iter().enumerate() {
        let id = VehicleId::from(pick);
        match puzzle.play(id) {
            Ok(result) => {
                println!("{}", report::move_line(index, &result));
                if *config.show_board() {
                    print!("{}", puzzle.board().display());
                    println!();
                }
            }
            Err(PuzzleError::Move(error)) => {
                // A bad pick is reported and skipped; the replay goes on.
                warn!(%error, index, "Move rejected");
                println!("{:>3}. rejected: {}", index + 1, error);
            }
            Err(other) => return Err(other.into()),
        }
    }

    println!("{}", report::status_line(&puzzle));
    Ok(())
}
