use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    apply::{self, ApplyArgs},
    generate::{self, GenerateArgs},
    inspect::{self, InspectArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod io;

#[derive(Parser, Debug)]
#[command(name = "halfhop", about = "Half-hop graph augmentation CLI")]
struct Cli {
    /// Tracing filter directive (e.g. `info`, `halfhop_transform=debug`).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a random graph for experiments and smoke tests.
    Generate(GenerateArgs),
    /// Insert slow nodes into a graph and write the augmented copies.
    Apply(ApplyArgs),
    /// Print node, edge and slow node counts for a graph file.
    Inspect(InspectArgs),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Apply(args) => apply::run(&args).map(|_| ()),
        Command::Inspect(args) => inspect::run(&args),
    }
}
