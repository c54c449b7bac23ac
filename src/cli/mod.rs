//! CLI for the boardlog server

pub mod serve;

use clap::{Parser, Subcommand};

/// boardlog - board game play tracking API
#[derive(Parser)]
#[command(name = "boardlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
