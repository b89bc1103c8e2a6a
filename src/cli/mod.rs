//! fibproc command line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::CONFIG_FILE_NAME;

/// fibproc - Fibonacci numbers and a memoizing sequence processor.
#[derive(Parser, Debug)]
#[command(name = "fibproc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Verbose mode.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Computes the n-th Fibonacci number.
    Fib {
        /// Index into the sequence.
        n: u32,

        /// Use naive double recursion instead of the iterative loop.
        #[arg(short, long)]
        recursive: bool,
    },

    /// Doubles the values and keeps those above 10, through the cache.
    Process {
        /// Input values.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Number of times to process the same input.
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,

        /// Print the result and cache statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prints the effective configuration.
    Config,

    /// Shows version.
    Version,
}
