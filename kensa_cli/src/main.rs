//! # Kensa CLI
//!
//! Judges barcode/QR scans against a compiled configuration and appends
//! audit rows to a host record kept as JSON.

mod cli;
mod commands;
mod logging;
mod store;

use clap::Parser;
use cli::{Cli, Commands};
use kensa_compiler::{log_error, log_info};
use kensa_compiler::logging::codes;
use std::io::{self, Write};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }
    log_info!("Kensa starting", "version" => env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        log_error!(codes::system::INTERNAL_ERROR, "Command failed", "reason" => &e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::CommandResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Check { sources } => commands::check(sources, cli.json, &mut out)?,
        Commands::Scan { sources, input } => {
            let scans = commands::read_scans(input.input.as_deref(), io::stdin().lock())?;
            commands::scan(sources, &scans, cli.json, &mut out)?;
        }
        Commands::Explain { sources, input } => {
            let scans = commands::read_scans(input.input.as_deref(), io::stdin().lock())?;
            commands::explain(sources, &scans, cli.json, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
