//! docbot CLI: PHP manual lookups from the command line.
//!
//! Runs the same `docs` command the chat bot answers, and classifies raw chat
//! event payloads for debugging.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
