//! Command-line interface for the unblock host.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_unblock::ExitRule;

/// Unblock - sliding-block puzzle runner
#[derive(Parser, Debug)]
#[command(name = "unblock")]
#[command(about = "Load, inspect and replay sliding-block puzzle levels", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a level file and print a summary
    Check {
        /// Level file (.json or .toml)
        level: PathBuf,
    },

    /// Print the initial board of a level
    Show {
        /// Level file (.json or .toml)
        level: PathBuf,
    },

    /// Replay a sequence of moves against a level
    Play {
        /// Level file (.json or .toml)
        level: PathBuf,

        /// Vehicle ids to move, in order (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Override the configured exit rule (immediate, stop_at_edge)
        #[arg(long)]
        exit_rule: Option<ExitRule>,

        /// Do not print the board after each move
        #[arg(long)]
        quiet: bool,
    },
}
