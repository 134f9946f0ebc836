//! fixity: CLI for directory integrity manifests

use std::process::ExitCode;

use clap::Parser;
use fixity_cli::commands;
use fixity_cli::logging::setup_logging;
use fixity_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let status = match cli.command {
        Commands::Scan(args) => commands::scan::run(&args).await?.exit_status(),
    };

    Ok(ExitCode::from(status))
}
