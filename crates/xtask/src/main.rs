//! Development tasks for the Masquerade battle engine.
//!
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Content, Simulate};
use tracing_subscriber::EnvFilter;

/// Development tools for Masquerade
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for Masquerade", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run an AI-vs-AI battle between two roster fighters
    Simulate(Simulate),

    /// List the content catalog
    Content(Content),
}

fn main() -> Result<()> {
    // BATTLE_* settings and RUST_LOG may come from a .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Content(cmd) => cmd.execute(),
    }
}
