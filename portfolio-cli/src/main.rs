//! `portfolio`: build reports over portfolio records and manage the
//! evidence bank from the terminal.
//!
//! Usage:
//!   portfolio --fixture demos/certificates.json schema Certificate
//!   portfolio --fixture demos/certificates.json report Certificate \
//!       -f id -f title -f issued_on --format csv --format pdf -o out/

use clap::Parser;
use portfolio_cli::cli::Cli;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut stdout = std::io::stdout();
    match portfolio_cli::run(&cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            eprintln!("{}", portfolio_cli::notice(&e));
            ExitCode::FAILURE
        }
    }
}
