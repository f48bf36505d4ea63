//! Berth CLI - verify installed build products

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use berth::ops::ManifestError;
use berth::util::diagnostic;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ManifestError>() {
            Some(manifest_err) => diagnostic::emit(&manifest_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("berth=debug")
    } else {
        EnvFilter::new("berth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, cli.verbose),
        Commands::Locate(args) => commands::locate::execute(args, cli.verbose),
        Commands::Generate(args) => commands::generate::execute(args, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
