mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    match cli.command {
        Command::Show(args) => commands::show(args)?,
        Command::Export(args) => commands::export(args)?,
    }

    Ok(())
}
