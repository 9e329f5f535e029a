//! Anchorage CLI - native library discovery for C++ builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("anchorage=debug")
    } else {
        EnvFilter::new("anchorage=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let session = commands::Session::new(&cli)?;

    match cli.command {
        Commands::Toolchain => commands::toolchain::execute(&session),
        Commands::SearchDirs(args) => commands::search_dirs::execute(args, &session),
        Commands::Probe => commands::probe::execute(&session),
        Commands::Resolve(args) => commands::resolve::execute(args, &session),
    }
}
