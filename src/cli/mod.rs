//! CLI module - Command-line interface for MovieMash
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// MovieMash - head-to-head voting on Letterboxd top-4 sets
#[derive(Parser)]
#[command(name = "moviemash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API and background maintenance until Ctrl+C
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Insert the demo catalogue, random top-4 sets and comparisons
    Seed {
        /// Number of random top-4 sets to create
        #[arg(long, default_value = "10")]
        sets: usize,
        /// Number of comparisons to create
        #[arg(long, default_value = "5")]
        comparisons: usize,
    },

    /// Backfill missing or suspicious posters from TMDB
    #[command(alias = "posters")]
    FetchPosters,

    /// Print the current movie leaderboard
    #[command(alias = "lb")]
    Leaderboard {
        /// Number of rows to show
        #[arg(long, short, default_value = "20")]
        limit: usize,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
